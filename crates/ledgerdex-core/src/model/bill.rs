use crate::{
    model::{DueDated, Record, RecordArgsError, expect_args},
    types::Timestamp,
};
use serde::{Deserialize, Serialize};

///
/// Bill
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Bill {
    pub id: String,
    #[serde(rename = "billid")]
    pub bill_id: String,
    #[serde(rename = "recipientid")]
    pub recipient_id: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(rename = "billdate")]
    pub bill_date: String,
    #[serde(rename = "billduedate")]
    pub bill_due_date: String,
    pub created_at: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub image: String,
    #[serde(rename = "tr_time")]
    pub timestamp: String,
}

impl Record for Bill {
    const TYPE_PREFIX: &'static str = "BILL";
    const MIRROR_KEY: &'static str = "_billindex";
    const PATH: &'static str = "bill";
    const ARITY: usize = 13;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn from_args<S: AsRef<str>>(args: &[S], created: Timestamp) -> Result<Self, RecordArgsError> {
        let a = expect_args(args, Self::ARITY)?;

        Ok(Self {
            id: a[0].to_string(),
            bill_id: a[1].to_string(),
            recipient_id: a[2].to_string(),
            user_id: a[3].to_string(),
            first_name: a[4].to_string(),
            last_name: a[5].to_string(),
            bill_date: a[6].to_string(),
            bill_due_date: a[7].to_string(),
            created_at: a[8].to_string(),
            description: a[9].to_string(),
            amount: a[10].to_string(),
            currency: a[11].to_string(),
            image: a[12].to_string(),
            timestamp: created.to_string(),
        })
    }
}

impl DueDated for Bill {
    fn due_date(&self) -> &str {
        &self.bill_due_date
    }
}
