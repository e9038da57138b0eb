//! Bill and payment operations.

use super::{Contract, at_least, exact};
use crate::error::Error;
use ledgerdex_core::{
    ledger::Ledger,
    model::{Bill, Payment, Record},
    serialize::serialize,
    types::{Clock, Date},
};
use serde::Serialize;

///
/// BillRef
/// One element of the bill-id listing, `{"Bill": "BILL<id>"}`.
///

#[derive(Serialize)]
struct BillRef {
    #[serde(rename = "Bill")]
    bill: String,
}

impl<L: Ledger, C: Clock> Contract<L, C> {
    pub(super) fn create_bill<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<u8>, Error> {
        let bill = Bill::from_args(args, self.clock.now())?;
        let len = self.db.save(&bill)?;
        tracing::info!(id = %bill.id, owner = %bill.user_id, mirror_len = len, "bill created");

        Ok(Vec::new())
    }

    pub(super) fn create_payment<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<u8>, Error> {
        let payment = Payment::from_args(args, self.clock.now())?;

        if self.track_payments {
            self.db.save(&payment)?;
        } else {
            self.db.save_without_mirror(&payment)?;
        }
        tracing::info!(id = %payment.id, owner = %payment.user_id, "payment created");

        Ok(Vec::new())
    }

    /// Stored bytes of `BILL<id>`; absent is an empty success.
    pub(super) fn query_bill<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 1, "1")?;

        Ok(self.db.load_raw::<Bill>(a[0])?.unwrap_or_default())
    }

    /// Stored bytes of `PAYMENT<id>`; absent is an empty success.
    pub(super) fn query_payment<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 1, "1")?;

        Ok(self.db.load_raw::<Payment>(a[0])?.unwrap_or_default())
    }

    /// `[{"Key": .., "Record": ..}]` for `start <= key < end`.
    pub(super) fn query_txs_by_range<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 2, "2")?;
        let rows = self.db.range(a[0], a[1])?;

        Ok(serialize(&rows)?)
    }

    /// `[{"Bill": "BILL<id>"}]` for every id indexed under the owner.
    pub(super) fn query_bill_ids_based_on_user<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<Vec<u8>, Error> {
        let refs: Vec<BillRef> = self
            .owner_ids(args)?
            .into_iter()
            .map(|bill| BillRef { bill })
            .collect();

        Ok(serialize(&refs)?)
    }

    /// `["BILL<id>", ..]` for every id indexed under the owner.
    pub(super) fn query_bills_based_on_user<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<Vec<u8>, Error> {
        Ok(serialize(&self.owner_ids(args)?)?)
    }

    /// Payments owned by the user; index entries with no payment are skipped.
    pub(super) fn query_payments_based_on_user<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<Vec<u8>, Error> {
        let a = at_least(args, 1, "1")?;
        let payments = self.db.owner_records::<Payment>(a[0])?;

        Ok(serialize(&payments)?)
    }

    /// Bills whose due date lies strictly between the two bounds.
    pub(super) fn query_by_date<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = at_least(args, 2, "2")?;
        let from = Date::parse(a[0])?;
        let to = Date::parse(a[1])?;

        let bills = self.db.due_between::<Bill>(from, to)?;
        tracing::info!(%from, %to, found = bills.len(), "bills by due date");

        Ok(serialize(&bills)?)
    }

    // Owner-indexed ids, tagged with the bill prefix.
    fn owner_ids<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<String>, Error> {
        let a = at_least(args, 1, "1")?;
        let ids = self.db.owner_record_ids(a[0])?;

        Ok(ids.iter().map(|id| Bill::primary_key(id)).collect())
    }
}
