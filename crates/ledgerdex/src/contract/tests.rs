use super::*;
use ledgerdex_core::{ledger::MemoryLedger, types::FixedClock};
use proptest::prelude::*;

#[test]
fn every_function_name_round_trips() {
    for function in Function::ALL {
        assert_eq!(function.as_str().parse::<Function>().unwrap(), function);
    }
}

#[test]
fn function_names_are_case_sensitive() {
    assert!("createbill".parse::<Function>().is_err());
    assert!("QUERY".parse::<Function>().is_err());
}

#[test]
fn unknown_function_lists_accepted_names() {
    let err = "transfer".parse::<Function>().unwrap_err();
    let message = err.to_string();

    assert!(message.ends_with("But got: transfer"), "{message}");
    assert!(message.contains("'init', 'createBill'"), "{message}");
    assert!(message.contains(", or 'query'."), "{message}");
}

#[test]
fn exact_rejects_too_many_and_too_few() {
    assert!(exact(&["a"], 1, "1").is_ok());
    assert_eq!(
        exact(&["a", "b"], 1, "1").unwrap_err(),
        ArgumentError::Count { expected: "1" }
    );
    assert!(exact::<&str>(&[], 1, "1").is_err());
}

#[test]
fn at_least_ignores_extra_arguments() {
    assert_eq!(at_least(&["u1", "extra"], 1, "1").unwrap(), vec!["u1"]);
    assert!(at_least::<&str>(&[], 1, "1").is_err());
}

#[test]
fn invoke_reports_unknown_function_as_error_response() {
    let mut contract = Contract::with_config(
        MemoryLedger::new(),
        FixedClock::from_unix(0),
        &ContractConfig::default(),
    );

    let response = contract.invoke::<&str>("queryAllBills", &[]);

    assert!(!response.is_success());
    assert!(response.message().unwrap().contains("queryAllBills"));
}

proptest! {
    #[test]
    fn only_listed_names_parse(name in "[a-zA-Z]{0,24}") {
        let listed = Function::ALL.iter().any(|function| function.as_str() == name);

        prop_assert_eq!(name.parse::<Function>().is_ok(), listed);
    }
}
