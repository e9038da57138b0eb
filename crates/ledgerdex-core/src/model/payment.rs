use crate::{
    model::{Record, RecordArgsError, expect_args},
    types::Timestamp,
};
use serde::{Deserialize, Serialize};

///
/// Payment
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payment {
    pub id: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub status: String,
    #[serde(rename = "exchrate")]
    pub exch_rate: String,
    pub fees: String,
    #[serde(rename = "fxrate")]
    pub fx_rate: String,
    #[serde(rename = "samount")]
    pub source_amount: String,
    #[serde(rename = "tamount")]
    pub target_amount: String,
    #[serde(rename = "scurrency")]
    pub source_currency: String,
    #[serde(rename = "tcurrency")]
    pub target_currency: String,
    pub memo: String,
    #[serde(rename = "processedat")]
    pub processed_at: String,
    #[serde(rename = "createdat")]
    pub created_at: String,
    #[serde(rename = "tr_time")]
    pub timestamp: String,
}

impl Record for Payment {
    const TYPE_PREFIX: &'static str = "PAYMENT";
    const MIRROR_KEY: &'static str = "_paymentindex";
    const PATH: &'static str = "payment";
    const ARITY: usize = 15;

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
            user_id: a[1].to_string(),
            first_name: a[2].to_string(),
            last_name: a[3].to_string(),
            status: a[4].to_string(),
            exch_rate: a[5].to_string(),
            fees: a[6].to_string(),
            fx_rate: a[7].to_string(),
            source_amount: a[8].to_string(),
            target_amount: a[9].to_string(),
            source_currency: a[10].to_string(),
            target_currency: a[11].to_string(),
            memo: a[12].to_string(),
            processed_at: a[13].to_string(),
            created_at: a[14].to_string(),
            timestamp: created.to_string(),
        })
    }
}
