//! Session scope: the shared, mutable session state of one server
//! environment and the coordination of its renewal.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::Error;
use crate::traits::{ObjectPersistence, SessionCreator};
use crate::types::{ConnectionParams, SessionId};
use crate::{Auth, Result, Session};

/// Reads the session identifier that is current at the moment of the call.
pub type SessionIdProvider = Arc<dyn Fn() -> SessionId + Send + Sync>;

/// Version of the session identifier held by a [`SessionStore`].
///
/// Bumped on every renewal. A request remembers the generation it was sent
/// with so that a later unauthorized response can tell whether somebody
/// else already renewed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// What a renewal request ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalOutcome {
    /// This caller logged in and published a new identifier.
    Renewed,
    /// Another caller renewed the session in the meantime.
    AlreadyRenewed,
    /// No usable credentials are stored, so the session cannot be renewed.
    NoAuth,
}

/// Everything needed to renew a session.
#[derive(Clone)]
pub struct Renewal {
    auth: Arc<dyn ObjectPersistence<Auth>>,
    creator: Arc<dyn SessionCreator>,
}

impl Renewal {
    pub fn new(auth: Arc<dyn ObjectPersistence<Auth>>, creator: Arc<dyn SessionCreator>) -> Self {
        Self { auth, creator }
    }
}

impl fmt::Debug for Renewal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renewal").finish_non_exhaustive()
    }
}

struct StoreState {
    session: Session,
    generation: u64,
}

#[derive(Default)]
struct RenewalState {
    last_failure: Option<Arc<Error>>,
}

/// Holds the current session and publishes renewals.
///
/// Reads are cheap and never wait for a renewal in progress. Renewals are
/// single-flight: while one caller is logging in, every other caller that
/// asks for a renewal of the same generation waits and then shares the
/// outcome.
pub struct SessionStore {
    state: RwLock<StoreState>,
    persistence: Option<Arc<dyn ObjectPersistence<Session>>>,
    renewal: Mutex<RenewalState>,
    failed_attempts: AtomicU64,
}

impl SessionStore {
    pub fn new(session: Session, persistence: Option<Arc<dyn ObjectPersistence<Session>>>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                session,
                generation: 0,
            }),
            persistence,
            renewal: Mutex::new(RenewalState::default()),
            failed_attempts: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current session.
    pub fn session(&self) -> Session {
        self.read(|state| state.session.clone())
    }

    /// Returns the current session identifier.
    pub fn session_id(&self) -> SessionId {
        self.read(|state| state.session.id().clone())
    }

    pub fn generation(&self) -> Generation {
        self.read(|state| Generation(state.generation))
    }

    pub fn connection(&self) -> ConnectionParams {
        self.read(|state| state.session.connection().clone())
    }

    /// Returns a provider that always reads the identifier current at call
    /// time.
    pub fn id_provider(self: &Arc<Self>) -> SessionIdProvider {
        let store = Arc::clone(self);
        Arc::new(move || store.session_id())
    }

    /// Replace the session identifier and persist the updated session.
    ///
    /// The new identifier is visible to readers before this returns.
    /// Persistence failures are logged; the in-memory session stays renewed.
    pub fn publish(&self, id: SessionId) -> Generation {
        let (session, generation) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.session.renew(id);
            state.generation += 1;
            (state.session.clone(), Generation(state.generation))
        };

        if let Some(persistence) = &self.persistence
            && let Err(e) = persistence.save_item(&session)
        {
            warn!(error = %e, "Failed to persist renewed session");
        }

        generation
    }

    /// Write the current session to persistence, if any is configured.
    pub fn flush(&self) -> Result<()> {
        match &self.persistence {
            Some(persistence) => persistence.save_item(&self.session()),
            None => Ok(()),
        }
    }

    /// Renew the session that was current at generation `seen`.
    ///
    /// If the session has moved past `seen` already, nothing is done and
    /// [`RenewalOutcome::AlreadyRenewed`] is returned. If a renewal attempt
    /// for `seen` failed while this caller was waiting, that failure is
    /// returned instead of logging in again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Renewal`] wrapping the login failure.
    #[instrument(skip(self, renewal), fields(generation = seen.0))]
    pub async fn renew(&self, seen: Generation, renewal: &Renewal) -> Result<RenewalOutcome> {
        let ticket = self.failed_attempts.load(Ordering::Acquire);
        let mut guard = self.renewal.lock().await;

        if self.generation() != seen {
            debug!("Session already renewed by a concurrent request");
            return Ok(RenewalOutcome::AlreadyRenewed);
        }

        if self.failed_attempts.load(Ordering::Acquire) != ticket
            && let Some(failure) = &guard.last_failure
        {
            debug!("Sharing the outcome of a failed concurrent renewal");
            return Err(Error::Renewal(Arc::clone(failure)));
        }

        let auth = match renewal.auth.load_item() {
            Ok(Some(auth)) => auth,
            Ok(None) => {
                debug!("No stored credentials, skipping renewal");
                return Ok(RenewalOutcome::NoAuth);
            }
            Err(e) => {
                warn!(error = %e, "Stored credentials are unreadable, skipping renewal");
                return Ok(RenewalOutcome::NoAuth);
            }
        };

        info!("Renewing session");
        let connection = self.connection();
        match renewal.creator.create_session(&connection, &auth).await {
            Ok(id) => {
                let generation = self.publish(id);
                debug!(generation = generation.0, "Session renewed");
                Ok(RenewalOutcome::Renewed)
            }
            Err(e) => {
                warn!(error = %e, "Session renewal failed");
                let failure = Arc::new(e);
                guard.last_failure = Some(Arc::clone(&failure));
                self.failed_attempts.fetch_add(1, Ordering::AcqRel);
                Err(Error::Renewal(failure))
            }
        }
    }

    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|state| {
            f.debug_struct("SessionStore")
                .field("session", &state.session)
                .field("generation", &state.generation)
                .finish_non_exhaustive()
        })
    }
}

/// The context of one logged-in server environment.
///
/// Constructed explicitly when a session is created or restored, handed to
/// HTTP client construction, and torn down with [`close`](Self::close) or
/// [`sign_out`](Self::sign_out).
pub struct SessionScope {
    store: Arc<SessionStore>,
    session_persistence: Option<Arc<dyn ObjectPersistence<Session>>>,
    auth_persistence: Option<Arc<dyn ObjectPersistence<Auth>>>,
}

impl SessionScope {
    pub fn new(
        session: Session,
        session_persistence: Option<Arc<dyn ObjectPersistence<Session>>>,
        auth_persistence: Option<Arc<dyn ObjectPersistence<Auth>>>,
    ) -> Self {
        Self {
            store: Arc::new(SessionStore::new(session, session_persistence.clone())),
            session_persistence,
            auth_persistence,
        }
    }

    /// A scope that is neither persisted nor renewable.
    pub fn ephemeral(session: Session) -> Self {
        Self::new(session, None, None)
    }

    /// Restore the scope from a persisted session.
    ///
    /// Returns `None` if no session is stored.
    #[instrument(skip_all)]
    pub fn restore(
        session_persistence: Arc<dyn ObjectPersistence<Session>>,
        auth_persistence: Option<Arc<dyn ObjectPersistence<Auth>>>,
    ) -> Result<Option<Self>> {
        let Some(session) = session_persistence.load_item()? else {
            debug!("No stored session");
            return Ok(None);
        };

        debug!(root_url = %session.connection().root_url, "Restored session");
        Ok(Some(Self::new(
            session,
            Some(session_persistence),
            auth_persistence,
        )))
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.store.session()
    }

    pub fn connection(&self) -> ConnectionParams {
        self.store.connection()
    }

    pub fn id_provider(&self) -> SessionIdProvider {
        self.store.id_provider()
    }

    /// Renewal settings for this scope, if credentials are stored.
    pub fn renewal(&self, creator: Arc<dyn SessionCreator>) -> Option<Renewal> {
        self.auth_persistence
            .as_ref()
            .filter(|auth| auth.has_item())
            .map(|auth| Renewal::new(Arc::clone(auth), creator))
    }

    /// Tear down the scope, saving the latest session.
    pub fn close(self) -> Result<()> {
        self.store.flush()
    }

    /// Tear down the scope and forget both the session and the credentials.
    #[instrument(skip_all)]
    pub fn sign_out(self) -> Result<()> {
        if let Some(persistence) = &self.session_persistence {
            persistence.clear()?;
        }
        if let Some(persistence) = &self.auth_persistence {
            persistence.clear()?;
        }
        info!("Signed out");
        Ok(())
    }
}

impl fmt::Debug for SessionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionScope")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
