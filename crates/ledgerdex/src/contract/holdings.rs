//! Balance-transfer operations over plain `name -> integer` entries.

use super::{Contract, exact};
use crate::error::{ArgumentError, Error};
use ledgerdex_core::{
    ledger::Ledger,
    model::{Bill, Payment},
    types::{Amount, Clock},
};

impl<L: Ledger, C: Clock> Contract<L, C> {
    /// `init A Aval B Bval`: write both holdings, then reset both mirrors.
    pub(super) fn init_holdings<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 4, "4")?;
        let a_val = parse_holding(a[1])?;
        let b_val = parse_holding(a[3])?;
        tracing::info!(a = a[0], %a_val, b = a[2], %b_val, "seeding holdings");

        let ledger = self.db.ledger_mut();
        ledger.put_state(a[0], a_val.to_string().as_bytes())?;
        ledger.put_state(a[2], b_val.to_string().as_bytes())?;

        self.db.reset_mirror::<Bill>()?;
        self.db.reset_mirror::<Payment>()?;

        Ok(Vec::new())
    }

    /// `move A B X`: move X units from A to B. Both must exist.
    pub(super) fn transfer<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 3, "4, function followed by 2 names and 1 value")?;
        let (from, to) = (a[0], a[1]);

        let from_val = self.holding(from)?;
        let to_val = self.holding(to)?;
        let amount = Amount::parse(a[2]).map_err(|_| ArgumentError::Transfer {
            input: a[2].to_string(),
        })?;

        let from_val = from_val.checked_sub(amount)?;
        let to_val = to_val.checked_add(amount)?;
        tracing::info!(from, %from_val, to, %to_val, "holdings moved");

        let ledger = self.db.ledger_mut();
        ledger.put_state(from, from_val.to_string().as_bytes())?;
        ledger.put_state(to, to_val.to_string().as_bytes())?;

        Ok(Vec::new())
    }

    /// `delete key`: remove a key; absent keys are not an error.
    pub(super) fn delete<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 1, "1")?;
        self.db.ledger_mut().del_state(a[0])?;

        Ok(Vec::new())
    }

    /// `query key`: the stored bytes; absent is an error.
    pub(super) fn query<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, Error> {
        let a = exact(args, 1, "name of the person to query")?;
        let name = a[0];

        let value = self
            .db
            .ledger()
            .get_state(name)
            .map_err(|err| {
                let message = error_json(&format!("Failed to get state for {name}"));
                Error::new(err.class, err.origin, message)
            })?
            .ok_or_else(|| Error::not_found(error_json(&format!("Nil amount for {name}"))))?;

        tracing::info!(name, amount = %String::from_utf8_lossy(&value), "query response");

        Ok(value)
    }

    fn holding(&self, name: &str) -> Result<Amount, Error> {
        let bytes = self
            .db
            .ledger()
            .get_state(name)?
            .ok_or_else(|| Error::not_found("Entity not found"))?;

        let text = String::from_utf8_lossy(&bytes);
        Amount::parse(&text)
            .map_err(|_| Error::corruption(format!("holding '{name}' is not an integer: {text}")))
    }
}

fn parse_holding(input: &str) -> Result<Amount, ArgumentError> {
    Amount::parse(input).map_err(|_| ArgumentError::Holding {
        input: input.to_string(),
    })
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "Error": message }).to_string()
}
