//! Module: contract
//! Responsibility: the named-operation surface over one ledger.
//! Does not own: indexing or query execution (see `ledgerdex_core::db`).
//! Boundary: each call takes ordered string arguments and returns a [`Response`].

mod holdings;
mod records;

use crate::{
    config::ContractConfig,
    error::{ArgumentError, Error},
    response::Response,
};
use ledgerdex_core::{
    db::Db,
    ledger::Ledger,
    types::{Clock, SystemClock},
};
use std::{fmt, str::FromStr};

///
/// Function
///
/// Every operation name accepted by [`Contract::invoke`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Function {
    Init,
    CreateBill,
    QueryBill,
    CreatePayment,
    QueryPayment,
    QueryTxsByRange,
    QueryBillIdsBasedOnUser,
    QueryBillsBasedOnUser,
    QueryPaymentsBasedOnUser,
    QueryByDate,
    Move,
    Delete,
    Query,
}

impl Function {
    pub const ALL: [Self; 13] = [
        Self::Init,
        Self::CreateBill,
        Self::QueryBill,
        Self::CreatePayment,
        Self::QueryPayment,
        Self::QueryTxsByRange,
        Self::QueryBillIdsBasedOnUser,
        Self::QueryBillsBasedOnUser,
        Self::QueryPaymentsBasedOnUser,
        Self::QueryByDate,
        Self::Move,
        Self::Delete,
        Self::Query,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateBill => "createBill",
            Self::QueryBill => "queryBill",
            Self::CreatePayment => "createPayment",
            Self::QueryPayment => "queryPayment",
            Self::QueryTxsByRange => "queryTxsByRange",
            Self::QueryBillIdsBasedOnUser => "queryBillIDsBasedOnUser",
            Self::QueryBillsBasedOnUser => "queryBillsBasedOnUser",
            Self::QueryPaymentsBasedOnUser => "queryPaymentsBasedOnUser",
            Self::QueryByDate => "queryByDate",
            Self::Move => "move",
            Self::Delete => "delete",
            Self::Query => "query",
        }
    }

    // 'a', 'b', or 'c'
    fn accepted_names() -> String {
        let quoted: Vec<String> = Self::ALL
            .iter()
            .map(|function| format!("'{}'", function.as_str()))
            .collect();

        match quoted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
            _ => quoted.concat(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.as_str() == s)
            .ok_or_else(|| ArgumentError::UnknownFunction {
                function: s.to_string(),
                accepted: Self::accepted_names(),
            })
    }
}

///
/// Contract
///
/// Operation dispatcher over a [`Db`] and a [`Clock`]. One call is one unit
/// of work; any failure aborts the call and earlier writes in it are kept.
///

pub struct Contract<L: Ledger, C: Clock = SystemClock> {
    db: Db<L>,
    clock: C,
    track_payments: bool,
}

impl<L: Ledger> Contract<L, SystemClock> {
    #[must_use]
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, SystemClock, &ContractConfig::default())
    }
}

impl<L: Ledger, C: Clock> Contract<L, C> {
    #[must_use]
    pub fn with_config(ledger: L, clock: C, config: &ContractConfig) -> Self {
        Self {
            db: Db::new(ledger).with_mirror_policy(config.mirror.policy),
            clock,
            track_payments: config.mirror.track_payments,
        }
    }

    #[must_use]
    pub const fn db(&self) -> &Db<L> {
        &self.db
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        self.db.ledger()
    }

    pub const fn ledger_mut(&mut self) -> &mut L {
        self.db.ledger_mut()
    }

    #[must_use]
    pub fn into_inner(self) -> L {
        self.db.into_inner()
    }

    /// Seed the two demo holdings and reset both collection mirrors.
    pub fn init<S: AsRef<str>>(&mut self, args: &[S]) -> Response {
        tracing::info!(args = args.len(), "init");

        let result = self.init_holdings(args);
        log_outcome("init", &result);

        result.into()
    }

    /// Dispatch `function` with its ordered arguments.
    pub fn invoke<S: AsRef<str>>(&mut self, function: &str, args: &[S]) -> Response {
        tracing::info!(function, args = args.len(), "invoke");

        let result = function
            .parse::<Function>()
            .map_err(Error::from)
            .and_then(|function| self.dispatch(function, args));
        log_outcome(function, &result);

        result.into()
    }

    fn dispatch<S: AsRef<str>>(&mut self, function: Function, args: &[S]) -> Result<Vec<u8>, Error> {
        match function {
            Function::Init => self.init_holdings(args),
            Function::CreateBill => self.create_bill(args),
            Function::QueryBill => self.query_bill(args),
            Function::CreatePayment => self.create_payment(args),
            Function::QueryPayment => self.query_payment(args),
            Function::QueryTxsByRange => self.query_txs_by_range(args),
            Function::QueryBillIdsBasedOnUser => self.query_bill_ids_based_on_user(args),
            Function::QueryBillsBasedOnUser => self.query_bills_based_on_user(args),
            Function::QueryPaymentsBasedOnUser => self.query_payments_based_on_user(args),
            Function::QueryByDate => self.query_by_date(args),
            Function::Move => self.transfer(args),
            Function::Delete => self.delete(args),
            Function::Query => self.query(args),
        }
    }
}

fn log_outcome(function: &str, result: &Result<Vec<u8>, Error>) {
    match result {
        Ok(bytes) => tracing::debug!(function, bytes = bytes.len(), "operation succeeded"),
        Err(err) => tracing::warn!(
            function,
            class = %err.class,
            origin = %err.origin,
            error = %err.message,
            "operation failed"
        ),
    }
}

//
// Argument helpers
//

// Exactly `n` arguments.
fn exact<'a, S: AsRef<str>>(
    args: &'a [S],
    n: usize,
    expected: &'static str,
) -> Result<Vec<&'a str>, ArgumentError> {
    if args.len() != n {
        return Err(ArgumentError::Count { expected });
    }

    Ok(args.iter().map(AsRef::as_ref).collect())
}

// At least `n` arguments; extras are ignored.
fn at_least<'a, S: AsRef<str>>(
    args: &'a [S],
    n: usize,
    expected: &'static str,
) -> Result<Vec<&'a str>, ArgumentError> {
    if args.len() < n {
        return Err(ArgumentError::Count { expected });
    }

    Ok(args.iter().take(n).map(AsRef::as_ref).collect())
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
