//! Store context and process-global registry
//!
//! `StoreContext` is the explicit wiring layer: one repository per entity
//! type, each configured with its file path and identifier strategy, all
//! observed by one shared audit log. Repositories construct lazily and are
//! referentially stable for the lifetime of the context.
//!
//! A process-global slot keeps the convenience of a singleton for demo/batch
//! callers while staying resettable for test isolation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use finrec_core::audit::AuditLog;
use finrec_core::model::{Account, Card, Client, Transaction};

use crate::errors::Result;
use crate::json;
use crate::repo::{RepoConfig, Repository, Sequential, StructuredCode, SuppliedOrSequence};

/// One repository per entity type, wired to a data directory
pub struct StoreContext {
    data_dir: PathBuf,
    audit: Arc<AuditLog>,
    clients: OnceLock<Arc<Repository<Client>>>,
    accounts: OnceLock<Arc<Repository<Account>>>,
    cards: OnceLock<Arc<Repository<Card>>>,
    transactions: OnceLock<Arc<Repository<Transaction>>>,
}

impl StoreContext {
    /// Create a context rooted at `data_dir`; no I/O happens until a
    /// repository is first touched.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            audit: Arc::new(AuditLog::new()),
            clients: OnceLock::new(),
            accounts: OnceLock::new(),
            cards: OnceLock::new(),
            transactions: OnceLock::new(),
        }
    }

    /// The audit log shared by every repository in this context
    pub fn audit_log(&self) -> Arc<AuditLog> {
        Arc::clone(&self.audit)
    }

    /// Directory holding the per-entity JSON files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Client repository: sequential numeric identifiers
    pub fn clients(&self) -> Arc<Repository<Client>> {
        Arc::clone(self.clients.get_or_init(|| {
            let config = RepoConfig::new(
                self.data_dir.join("clients.json"),
                Arc::new(Sequential),
                |c: &Client| c.id.unwrap_or(0),
            );
            Arc::new(Repository::new(config, Arc::clone(&self.audit)))
        }))
    }

    /// Account repository: country-prefixed structured codes
    pub fn accounts(&self) -> Arc<Repository<Account>> {
        Arc::clone(self.accounts.get_or_init(|| {
            let config = RepoConfig::new(
                self.data_dir.join("accounts.json"),
                Arc::new(StructuredCode {
                    prefix: "RO",
                    digits: 22,
                }),
                // Structured codes carry no sequence component
                |_: &Account| 0,
            );
            Arc::new(Repository::new(config, Arc::clone(&self.audit)))
        }))
    }

    /// Card repository: caller-supplied numbers with fallback-on-collision
    pub fn cards(&self) -> Arc<Repository<Card>> {
        Arc::clone(self.cards.get_or_init(|| {
            let config = RepoConfig::new(
                self.data_dir.join("cards.json"),
                Arc::new(SuppliedOrSequence),
                |c: &Card| {
                    c.number
                        .as_deref()
                        .and_then(|n| n.parse().ok())
                        .unwrap_or(0)
                },
            );
            Arc::new(Repository::new(config, Arc::clone(&self.audit)))
        }))
    }

    /// Transaction repository: sequential numeric identifiers
    pub fn transactions(&self) -> Arc<Repository<Transaction>> {
        Arc::clone(self.transactions.get_or_init(|| {
            let config = RepoConfig::new(
                self.data_dir.join("transactions.json"),
                Arc::new(Sequential),
                |t: &Transaction| t.id.unwrap_or(0),
            );
            Arc::new(Repository::new(config, Arc::clone(&self.audit)))
        }))
    }

    /// Force-persist every repository that has been constructed
    ///
    /// # Errors
    /// The first failing save aborts and propagates.
    pub fn save_all(&self) -> Result<()> {
        if let Some(repo) = self.clients.get() {
            repo.save()?;
        }
        if let Some(repo) = self.accounts.get() {
            repo.save()?;
        }
        if let Some(repo) = self.cards.get() {
            repo.save()?;
        }
        if let Some(repo) = self.transactions.get() {
            repo.save()?;
        }
        Ok(())
    }

    /// Best-effort persist of the audit trail next to the entity files
    ///
    /// Audit persistence must never block business operations, so failures
    /// are logged and swallowed here.
    pub fn save_audit_log(&self) {
        let records = self.audit.records();
        if records.is_empty() {
            return;
        }
        if let Err(err) = json::save(&records, &self.data_dir.join("audit.json")) {
            tracing::warn!(error = %err, "Audit trail persistence failed; continuing");
        }
    }
}

static GLOBAL: Mutex<Option<Arc<StoreContext>>> = Mutex::new(None);

fn global_slot() -> std::sync::MutexGuard<'static, Option<Arc<StoreContext>>> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-global context, lazily installed at the default `data` directory
///
/// Every call returns the same context (and therefore the same repository
/// instances) until [`install`] or [`reset`] replaces it.
pub fn global() -> Arc<StoreContext> {
    let mut slot = global_slot();
    Arc::clone(slot.get_or_insert_with(|| Arc::new(StoreContext::new("data"))))
}

/// Replace the process-global context, returning the previous one if any
pub fn install(context: Arc<StoreContext>) -> Option<Arc<StoreContext>> {
    global_slot().replace(context)
}

/// Clear the process-global context; the next [`global`] call reinstalls a
/// default. Test-isolation hook.
pub fn reset() {
    global_slot().take();
}
