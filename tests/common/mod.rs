//! Shared test support: an in-memory document store that records every
//! call and can be scripted to fail per operation.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use userreg_manager::app::{AppState, Theme};
use userreg_manager::error::{Result, simple_error};
use userreg_manager::store::{UserFields, UserRecord, UserStore};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create(UserFields),
    ListAll,
    Update(String, UserFields),
    Delete(String),
}

#[derive(Default)]
pub struct RecordingStore {
    pub calls: RefCell<Vec<Call>>,
    pub records: RefCell<Vec<UserRecord>>,
    pub fail_create: RefCell<Option<String>>,
    pub fail_list: RefCell<Option<String>>,
    pub fail_update: RefCell<Option<String>>,
    pub fail_delete: RefCell<Option<String>>,
    pub next_id: RefCell<u32>,
}

impl RecordingStore {
    pub fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_records(records: Vec<UserRecord>) -> Rc<Self> {
        let store = Self::default();
        *store.records.borrow_mut() = records;
        Rc::new(store)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that would have reached the remote store as writes.
    pub fn write_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, Call::ListAll))
            .cloned()
            .collect()
    }
}

impl UserStore for RecordingStore {
    fn create(&self, fields: &UserFields) -> Result<String> {
        self.calls.borrow_mut().push(Call::Create(fields.clone()));
        if let Some(msg) = self.fail_create.borrow().clone() {
            return Err(simple_error(msg));
        }
        *self.next_id.borrow_mut() += 1;
        let id = format!("u{}", self.next_id.borrow());
        self.records.borrow_mut().push(UserRecord {
            id: id.clone(),
            fields: fields.clone(),
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()),
        });
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<UserRecord>> {
        self.calls.borrow_mut().push(Call::ListAll);
        if let Some(msg) = self.fail_list.borrow().clone() {
            return Err(simple_error(msg));
        }
        Ok(self.records.borrow().clone())
    }

    fn update(&self, id: &str, fields: &UserFields) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Update(id.to_string(), fields.clone()));
        if let Some(msg) = self.fail_update.borrow().clone() {
            return Err(simple_error(msg));
        }
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.fields = fields.clone();
                Ok(())
            }
            None => Err(simple_error(format!("no document '{id}'"))),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.calls.borrow_mut().push(Call::Delete(id.to_string()));
        if let Some(msg) = self.fail_delete.borrow().clone() {
            return Err(simple_error(msg));
        }
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(simple_error(format!("no document '{id}'")));
        }
        Ok(())
    }
}

pub fn app_with(store: &Rc<RecordingStore>) -> AppState {
    AppState::new(Box::new(store.clone()), Theme::dark())
}

pub fn fields(name: &str, email: &str, phone: &str, address: &str, profession: &str) -> UserFields {
    UserFields {
        full_name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        profession: profession.to_string(),
    }
}

pub fn record(id: &str, name: &str, email: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        fields: fields(name, email, "0123456789", "1 Test Lane", ""),
        created_at: Some(Utc.with_ymd_and_hms(2025, 12, 24, 9, 30, 0).unwrap()),
    }
}
