use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::fixture_file;

const FIXTURE: &str = r#"{
    "plans": [
        {"id": "gratuito", "name": "Gratuito/Trial", "price": 0.00},
        {"id": "premium", "name": "Premium (Mensal)", "price": 49.90, "duration_days": 30}
    ],
    "payments": {
        "123456": {
            "id": "123456",
            "status": "approved",
            "status_detail": "accredited",
            "transaction_amount": 49.90,
            "date_created": "2025-08-01T12:00:00Z",
            "date_approved": "2025-08-01T12:00:05Z",
            "payment_method_id": "pix",
            "payment_type_id": "bank_transfer"
        }
    },
    "create": {"init_point": "https://mp.example/checkout/p1", "payment_id": "p1"}
}"#;

const FIXTURE_NO_INIT_POINT: &str = r#"{
    "plans": [{"id": "premium", "name": "Premium (Mensal)", "price": 49.90}],
    "create": {"payment_id": "p1"}
}"#;

#[test]
fn test_reconcile_approved_navigates_to_dashboard() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("--grace-delay")
        .arg("0")
        .arg("reconcile")
        .arg("--query")
        .arg("payment_id=123456&status=rejected");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("outcome: success"))
        .stdout(predicate::str::contains("status: approved"))
        .stdout(predicate::str::contains(
            "notice: Pagamento aprovado com sucesso!",
        ))
        .stdout(predicate::str::contains(
            "navigating to: /dashboard?payment=success",
        ));
}

#[test]
fn test_reconcile_cancelled_offers_retry_without_navigation() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("reconcile")
        .arg("--query")
        .arg("status=cancelled");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("outcome: failed"))
        .stdout(predicate::str::contains("notice: Pagamento não foi aprovado."))
        .stdout(predicate::str::contains("action: /planos"))
        .stdout(predicate::str::contains("action: /ajuda"))
        .stdout(predicate::str::contains("navigating to:").not());
}

#[test]
fn test_reconcile_unknown_payment_id_reports_recoverable_error() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("reconcile")
        .arg("--query")
        .arg("payment_id=000&status=pending");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("outcome: unknown"))
        .stdout(predicate::str::contains(
            "error: Erro ao verificar status do pagamento",
        ))
        .stdout(predicate::str::contains("navigating to:").not());
}

#[test]
fn test_checkout_prints_redirect() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("checkout")
        .arg("--plan")
        .arg("premium")
        .arg("--user")
        .arg("u1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("payment_id: p1"))
        .stdout(predicate::str::contains(
            "redirect to: https://mp.example/checkout/p1",
        ));
}

#[test]
fn test_checkout_without_init_point_fails() {
    let fixture = fixture_file(FIXTURE_NO_INIT_POINT);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("checkout")
        .arg("--plan")
        .arg("premium")
        .arg("--user")
        .arg("u1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Erro ao criar pagamento"))
        .stdout(predicate::str::contains("redirect to:").not());
}

#[test]
fn test_checkout_free_plan_is_rejected() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture")
        .arg(fixture.path())
        .arg("checkout")
        .arg("--plan")
        .arg("gratuito")
        .arg("--user")
        .arg("u1");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("redirect to:").not());
}

#[test]
fn test_plans_lists_catalog() {
    let fixture = fixture_file(FIXTURE);

    let mut cmd = Command::new(cargo_bin!("gabarita-pay"));
    cmd.arg("--fixture").arg(fixture.path()).arg("plans");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("premium"))
        .stdout(predicate::str::contains("Gratuito/Trial"));
}
