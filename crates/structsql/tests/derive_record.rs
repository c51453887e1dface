#![allow(dead_code)]

use std::collections::BTreeMap;
use structsql::{Engine, Kind, Record, ToValue, TypeKey, Value};

#[derive(Record)]
#[structsql(table = "accounts")]
struct Account {
    #[structsql(id)]
    code: String,
    owner: String,
    #[structsql(column = "balance_cents")]
    balance: Option<i64>,
    #[structsql(bytes)]
    avatar: Vec<u8>,
    #[structsql(skip)]
    dirty: bool,
}

fn account() -> Account {
    Account {
        code: "A-1".into(),
        owner: "alice".into(),
        balance: Some(0),
        avatar: vec![1, 2, 3],
        dirty: true,
    }
}

#[test]
fn attributes_shape_the_record() {
    let acct = account();
    assert_eq!(acct.type_name(), Some("Account"));
    assert_eq!(acct.table_name(), Some("accounts"));
    assert_eq!(acct.field_count(), 4);

    let code = acct.field_def(0).unwrap();
    assert!(code.primary_key);
    assert_eq!(acct.field_def(2).unwrap().column, Some("balance_cents"));
    assert!(acct.field_def(4).is_none());

    assert_eq!(acct.field_value(3), Value::Bytes(vec![1, 2, 3].into()));
    assert_eq!(acct.field_value(4), Value::Null);
}

#[test]
fn explicit_table_and_key() {
    let mut engine = Engine::new();
    let (mut sql, mut values) = (String::new(), Vec::new());
    let acct = account();

    engine.insert(&acct, &mut sql, &mut values).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO accounts (code, owner, balance_cents, avatar) VALUES ($1, $2, $3, $4)"
    );

    engine.update(&acct, &mut sql, &mut values).unwrap();
    assert_eq!(
        sql,
        "UPDATE accounts SET owner=$1, balance_cents=$2, avatar=$3 WHERE code=$4"
    );
    assert_eq!(values[1], Value::Int(0));
    assert_eq!(values[3], Value::from("A-1"));

    engine.delete(&acct, &mut sql, &mut values).unwrap();
    assert_eq!(sql, "DELETE FROM accounts WHERE code=$1");
}

#[test]
fn option_distinguishes_unset_from_zero() {
    let mut engine = Engine::new();
    let (mut sql, mut values) = (String::new(), Vec::new());
    let acct = Account {
        owner: String::new(),
        balance: None,
        avatar: Vec::new(),
        ..account()
    };

    let err = engine.update(&acct, &mut sql, &mut values).unwrap_err();
    assert!(err.is_no_fields_to_update());

    let acct = Account {
        balance: Some(0),
        ..acct
    };
    let mut values = Vec::new();
    engine.update(&acct, &mut sql, &mut values).unwrap();
    assert_eq!(sql, "UPDATE accounts SET balance_cents=$1 WHERE code=$2");
}

#[derive(Record)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Record)]
struct Customer {
    id: i64,
    name: String,
    address: Address,
    tags: Vec<String>,
    prefs: BTreeMap<String, bool>,
}

#[test]
fn nested_and_container_fields() {
    let mut engine = Engine::new();
    let (mut sql, mut values) = (String::new(), Vec::new());
    let customer = Customer {
        id: 3,
        name: String::new(),
        address: Address {
            city: String::new(),
            zip: String::new(),
        },
        tags: vec!["vip".into()],
        prefs: BTreeMap::new(),
    };

    // An all-zero nested record and an empty map are skipped.
    engine.update(&customer, &mut sql, &mut values).unwrap();
    assert_eq!(sql, "UPDATE customers SET tags=$1 WHERE id=$2");
    assert_eq!(values[0].kind(), Kind::List);

    let customer = Customer {
        address: Address {
            city: "Oslo".into(),
            zip: String::new(),
        },
        ..customer
    };
    let mut values = Vec::new();
    engine.update(&customer, &mut sql, &mut values).unwrap();
    assert_eq!(sql, "UPDATE customers SET address=$1, tags=$2 WHERE id=$3");
    assert_eq!(values[0].kind(), Kind::Record);
    assert_eq!(
        serde_json::to_string(&values[0]).unwrap(),
        r#"{"city":"Oslo","zip":""}"#
    );
}

#[test]
fn derived_record_zero_is_all_fields_zero() {
    let empty = Address {
        city: String::new(),
        zip: String::new(),
    };
    assert!(empty.is_zero());
    let partial = Address {
        zip: "0150".into(),
        ..empty
    };
    assert!(!partial.is_zero());
}

#[derive(Record)]
struct Borrowed<'a> {
    id: i64,
    title: &'a str,
}

#[derive(Record)]
struct Generic<T: ToValue> {
    id: i64,
    payload: T,
}

#[test]
fn borrowing_and_generic_records() {
    let title = String::from("hello");
    let row = Borrowed { id: 1, title: &title };
    assert!(matches!(row.type_key(), TypeKey::Name(_)));

    let mut engine = Engine::new();
    let (mut sql, mut values) = (String::new(), Vec::new());
    engine.insert(&row, &mut sql, &mut values).unwrap();
    assert_eq!(sql, "INSERT INTO borroweds (id, title) VALUES ($1, $2)");
    assert_eq!(values[1].as_str(), Some("hello"));

    let a = Generic { id: 1, payload: 5_i32 };
    let b = Generic {
        id: 1,
        payload: String::from("x"),
    };
    assert_ne!(a.type_key(), b.type_key());

    let mut sql_b = String::new();
    let mut values_b = Vec::new();
    engine.insert(&a, &mut sql, &mut values).unwrap();
    engine.insert(&b, &mut sql_b, &mut values_b).unwrap();
    assert_eq!(sql, "INSERT INTO generics (id, payload) VALUES ($1, $2)");
    assert_eq!(sql, sql_b);
}

#[derive(Record)]
struct Empty {}

#[test]
fn record_without_fields() {
    let mut engine = Engine::new();
    let (mut sql, mut values) = (String::new(), Vec::new());
    let err = engine.insert(&Empty {}, &mut sql, &mut values).unwrap_err();
    assert_eq!(err.to_string(), "Record for table 'emptys' has no fields");
}
