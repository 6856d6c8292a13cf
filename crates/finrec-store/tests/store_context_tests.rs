// End-to-end wiring through StoreContext: one file per entity type, one
// shared audit trail, best-effort audit persistence.

use finrec_core::audit::AuditRecord;
use finrec_core::model::{
    Account, AccountOperation, Card, CardOperation, Client, ClientOperation, Transaction,
    TransactionOperation,
};
use finrec_store::{json, StoreContext};
use rust_decimal::Decimal;
use tempfile::TempDir;

#[test]
fn test_one_file_per_entity_type() {
    let dir = TempDir::new().unwrap();
    let ctx = StoreContext::new(dir.path());

    let client = ctx
        .clients()
        .create(
            Client::new("Ana", "Pop", "ana@example.com", "+40700000000"),
            ClientOperation::Create,
        )
        .unwrap();
    let account = ctx
        .accounts()
        .create(Account::new(client.id.unwrap(), "RON"), AccountOperation::Create)
        .unwrap();
    let iban = account.iban.clone().unwrap();
    ctx.cards()
        .create(
            Card::new("4000123412341234", &iban, "ANA POP", 12, 2030),
            CardOperation::Create,
        )
        .unwrap();
    ctx.transactions()
        .create(
            Transaction::deposit(&iban, Decimal::ONE_HUNDRED, "RON"),
            TransactionOperation::Create,
        )
        .unwrap();

    ctx.save_all().unwrap();

    for file in ["clients.json", "accounts.json", "cards.json", "transactions.json"] {
        assert!(dir.path().join(file).exists(), "{file} should exist");
    }

    // Each mutation landed in the one shared trail
    let audit = ctx.audit_log();
    assert_eq!(audit.len(), 4);
    assert_eq!(audit.history("client", "1").len(), 1);
    assert_eq!(audit.history("card", "4000123412341234").len(), 1);
}

#[test]
fn test_audit_trail_persists_as_json() {
    let dir = TempDir::new().unwrap();
    let ctx = StoreContext::new(dir.path());

    ctx.clients()
        .create(
            Client::new("Ana", "Pop", "ana@example.com", "+40700000000"),
            ClientOperation::Create,
        )
        .unwrap();
    ctx.save_audit_log();

    let records: Vec<AuditRecord> = json::load(&dir.path().join("audit.json"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].operation, "CREATE");
    assert_eq!(records[0].entity_kind, "client");
}

#[test]
fn test_empty_audit_trail_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let ctx = StoreContext::new(dir.path());

    ctx.save_audit_log();
    assert!(!dir.path().join("audit.json").exists());
}

#[test]
fn test_context_survives_reload() {
    let dir = TempDir::new().unwrap();
    {
        let ctx = StoreContext::new(dir.path());
        ctx.clients()
            .create(
                Client::new("Ana", "Pop", "ana@example.com", "+40700000000"),
                ClientOperation::Create,
            )
            .unwrap();
        ctx.save_all().unwrap();
    }

    // A fresh context over the same directory sees the persisted records
    let ctx = StoreContext::new(dir.path());
    assert_eq!(ctx.clients().count(), 1);
    let next = ctx
        .clients()
        .create(
            Client::new("Bob", "Ion", "bob@example.com", "+40700000001"),
            ClientOperation::Create,
        )
        .unwrap();
    assert_eq!(next.id, Some(2));
}
