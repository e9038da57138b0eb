//! Shared fixtures for unit tests.

use crate::{
    model::{Bill, Payment},
    types::Timestamp,
};

pub(crate) const TR_TIME: &str = "2016-01-01T00:00:00Z";

pub(crate) fn created() -> Timestamp {
    Timestamp::from_unix(1_451_606_400).unwrap()
}

pub(crate) fn bill(id: &str, owner: &str, due: &str) -> Bill {
    Bill {
        id: id.to_string(),
        bill_id: format!("inv-{id}"),
        recipient_id: "acme".to_string(),
        user_id: owner.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        bill_date: "2016-01-01".to_string(),
        bill_due_date: due.to_string(),
        created_at: "2016-01-01".to_string(),
        description: "power".to_string(),
        amount: "120.50".to_string(),
        currency: "EUR".to_string(),
        image: String::new(),
        timestamp: TR_TIME.to_string(),
    }
}

pub(crate) fn payment(id: &str, owner: &str) -> Payment {
    Payment {
        id: id.to_string(),
        user_id: owner.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        status: "processed".to_string(),
        exch_rate: "1.1".to_string(),
        fees: "2".to_string(),
        fx_rate: "1.1".to_string(),
        source_amount: "100".to_string(),
        target_amount: "110".to_string(),
        source_currency: "EUR".to_string(),
        target_currency: "USD".to_string(),
        memo: "rent".to_string(),
        processed_at: "2016-02-01".to_string(),
        created_at: "2016-02-01".to_string(),
        timestamp: TR_TIME.to_string(),
    }
}
