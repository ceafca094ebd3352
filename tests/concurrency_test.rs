use feeledger::application::engine::SubmitPayment;
use feeledger::domain::payment::{PaymentMethod, PaymentStatus};
use feeledger::domain::student::StudentId;
use feeledger::error::LedgerError;
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;
use common::{admin, cohort_engine, guardian};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_decisions_have_one_winner() {
    let engine = Arc::new(cohort_engine().await);

    for _ in 0..25 {
        let payment = engine
            .submit_payment(&guardian(), SubmitPayment::new("S1", dec!(20000), PaymentMethod::MobileMoney))
            .await
            .unwrap();

        let confirm = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .transition_payment(payment.id, PaymentStatus::Confirmed, &admin(), None)
                    .await
            })
        };
        let reject = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .transition_payment(payment.id, PaymentStatus::Rejected, &admin(), Some("duplicate"))
                    .await
            })
        };

        let results = [confirm.await.unwrap(), reject.await.unwrap()];
        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1, "exactly one decision must win");

        let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert!(matches!(
            loser,
            LedgerError::Conflict { .. } | LedgerError::InvalidTransition { .. }
        ));

        let history = engine.payment_history(&StudentId::from("S1")).await.unwrap();
        let stored = history.iter().find(|p| p.id == payment.id).unwrap();
        assert_eq!(&stored.status, &winners[0].status);
        assert_eq!(stored.version, 2);
    }
}
