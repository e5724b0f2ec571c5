use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::report::DateWindow;

/// The whole record store, persisted as one TOML document.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Store {
    #[serde(default)]
    pub counter: Counter,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub expenditures: Vec<Expenditure>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Counter {
    pub next_job: i64,
    pub next_item: i64,
    pub next_expenditure: i64,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            next_job: 1,
            next_item: 1,
            next_expenditure: 1,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Completed,
    Incomplete,
}

impl FromStr for JobStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "completed" => Ok(JobStatus::Completed),
            "incomplete" => Ok(JobStatus::Incomplete),
            _ => Err(LedgerError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Incomplete => write!(f, "Incomplete"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            _ => Err(LedgerError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A service job. Items are owned by the job and go away with it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Job {
    pub id: i64,
    pub customer_name: String,
    pub status: JobStatus,
    pub payment_method: PaymentMethod,
    pub date_time: NaiveDateTime,
    pub created_by: String,
    #[serde(default)]
    pub items: Vec<JobItem>,
}

impl Job {
    /// Live sum of the current items. Never stored.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|i| i.total).sum()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JobItem {
    pub id: i64,
    pub description: String,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Expenditure {
    pub id: i64,
    pub description: String,
    pub quantity: f64,
    pub amount_used: f64,
    pub total: f64,
    pub date_time: NaiveDateTime,
    pub created_by: String,
}

/// Validated input for one job line item. Totals are computed by the store at
/// write time, never taken from the caller.
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub description: String,
    pub quantity: f64,
    pub price: f64,
}

impl ItemInput {
    /// Parse a "description:quantity:price" spec from the command line.
    pub fn parse(spec: &str) -> Result<ItemInput> {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 3 {
            return Err(LedgerError::InvalidItemFormat(spec.to_string()));
        }

        let description = parts[0].trim();
        if description.is_empty() {
            return Err(LedgerError::InvalidItemFormat(spec.to_string()));
        }

        let quantity: f64 = parts[1].trim().parse().map_err(|_| LedgerError::InvalidNumber {
            field: "quantity",
            value: parts[1].trim().to_string(),
            reason: "must be a number".to_string(),
        })?;

        if quantity <= 0.0 {
            return Err(LedgerError::InvalidNumber {
                field: "quantity",
                value: parts[1].trim().to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let price: f64 = parts[2].trim().parse().map_err(|_| LedgerError::InvalidNumber {
            field: "price",
            value: parts[2].trim().to_string(),
            reason: "must be a number".to_string(),
        })?;

        Ok(ItemInput {
            description: description.to_string(),
            quantity,
            price,
        })
    }
}

impl Store {
    /// Record a new job. Returns the assigned id.
    pub fn add_job(
        &mut self,
        customer_name: &str,
        status: JobStatus,
        payment_method: PaymentMethod,
        items: Vec<ItemInput>,
        created_by: &str,
        now: NaiveDateTime,
    ) -> i64 {
        let id = self.counter.next_job;
        self.counter.next_job += 1;

        let items = self.build_items(items);
        self.jobs.push(Job {
            id,
            customer_name: customer_name.to_string(),
            status,
            payment_method,
            date_time: now,
            created_by: created_by.to_string(),
            items,
        });

        id
    }

    /// Update a job. The submitted item set replaces the prior one wholesale;
    /// replaced items get fresh ids, matching a delete-then-insert write.
    pub fn edit_job(
        &mut self,
        id: i64,
        customer_name: &str,
        status: JobStatus,
        payment_method: PaymentMethod,
        items: Vec<ItemInput>,
    ) -> Result<()> {
        let pos = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or(LedgerError::JobNotFound(id))?;

        let items = self.build_items(items);
        let job = &mut self.jobs[pos];
        job.customer_name = customer_name.to_string();
        job.status = status;
        job.payment_method = payment_method;
        job.items = items;

        Ok(())
    }

    pub fn delete_job(&mut self, id: i64) -> Result<()> {
        let pos = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or(LedgerError::JobNotFound(id))?;
        self.jobs.remove(pos);
        Ok(())
    }

    pub fn job(&self, id: i64) -> Result<&Job> {
        self.jobs
            .iter()
            .find(|j| j.id == id)
            .ok_or(LedgerError::JobNotFound(id))
    }

    /// Record a new expenditure. Total is quantity x amount_used, computed here.
    pub fn add_expenditure(
        &mut self,
        description: &str,
        quantity: f64,
        amount_used: f64,
        created_by: &str,
        now: NaiveDateTime,
    ) -> i64 {
        let id = self.counter.next_expenditure;
        self.counter.next_expenditure += 1;

        self.expenditures.push(Expenditure {
            id,
            description: description.to_string(),
            quantity,
            amount_used,
            total: quantity * amount_used,
            date_time: now,
            created_by: created_by.to_string(),
        });

        id
    }

    pub fn edit_expenditure(
        &mut self,
        id: i64,
        description: &str,
        quantity: f64,
        amount_used: f64,
    ) -> Result<()> {
        let exp = self
            .expenditures
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::ExpenditureNotFound(id))?;

        exp.description = description.to_string();
        exp.quantity = quantity;
        exp.amount_used = amount_used;
        exp.total = quantity * amount_used;

        Ok(())
    }

    pub fn delete_expenditure(&mut self, id: i64) -> Result<()> {
        let pos = self
            .expenditures
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::ExpenditureNotFound(id))?;
        self.expenditures.remove(pos);
        Ok(())
    }

    pub fn expenditure(&self, id: i64) -> Result<&Expenditure> {
        self.expenditures
            .iter()
            .find(|e| e.id == id)
            .ok_or(LedgerError::ExpenditureNotFound(id))
    }

    /// Jobs inside the window, newest first.
    pub fn jobs_in(&self, window: &DateWindow) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self
            .jobs
            .iter()
            .filter(|j| window.contains(j.date_time))
            .collect();
        jobs.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        jobs
    }

    /// Expenditures inside the window, newest first.
    pub fn expenditures_in(&self, window: &DateWindow) -> Vec<&Expenditure> {
        let mut expenditures: Vec<&Expenditure> = self
            .expenditures
            .iter()
            .filter(|e| window.contains(e.date_time))
            .collect();
        expenditures.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        expenditures
    }

    fn build_items(&mut self, inputs: Vec<ItemInput>) -> Vec<JobItem> {
        inputs
            .into_iter()
            .map(|input| {
                let id = self.counter.next_item;
                self.counter.next_item += 1;
                JobItem {
                    id,
                    total: input.quantity * input.price,
                    description: input.description,
                    quantity: input.quantity,
                    price: input.price,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn item(description: &str, quantity: f64, price: f64) -> ItemInput {
        ItemInput {
            description: description.to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn item_totals_computed_at_write_time() {
        let mut store = Store::default();
        let id = store.add_job(
            "Acme",
            JobStatus::Completed,
            PaymentMethod::Cash,
            vec![item("Widget", 3.0, 10.0)],
            "admin",
            at(2026, 3, 5),
        );

        assert_eq!(store.job(id).unwrap().items[0].total, 30.0);

        store
            .edit_job(
                id,
                "Acme",
                JobStatus::Completed,
                PaymentMethod::Cash,
                vec![item("Widget", 2.0, 10.0)],
            )
            .unwrap();

        assert_eq!(store.job(id).unwrap().items[0].total, 20.0);
    }

    #[test]
    fn job_total_is_live_item_sum() {
        let mut store = Store::default();
        let id = store.add_job(
            "Acme",
            JobStatus::Completed,
            PaymentMethod::Transfer,
            vec![item("A", 1.0, 100.0), item("B", 2.0, 25.0)],
            "admin",
            at(2026, 3, 5),
        );
        assert_eq!(store.job(id).unwrap().total_amount(), 150.0);

        store
            .edit_job(
                id,
                "Acme",
                JobStatus::Completed,
                PaymentMethod::Transfer,
                vec![item("A", 1.0, 100.0)],
            )
            .unwrap();
        assert_eq!(store.job(id).unwrap().total_amount(), 100.0);
    }

    #[test]
    fn edit_replaces_items_with_fresh_ids() {
        let mut store = Store::default();
        let id = store.add_job(
            "Acme",
            JobStatus::Incomplete,
            PaymentMethod::Cash,
            vec![item("A", 1.0, 1.0), item("B", 1.0, 1.0), item("C", 1.0, 1.0)],
            "admin",
            at(2026, 3, 5),
        );

        let old_ids: Vec<i64> = store.job(id).unwrap().items.iter().map(|i| i.id).collect();
        assert_eq!(old_ids, vec![1, 2, 3]);

        store
            .edit_job(
                id,
                "Acme",
                JobStatus::Incomplete,
                PaymentMethod::Cash,
                vec![item("D", 1.0, 1.0)],
            )
            .unwrap();

        let job = store.job(id).unwrap();
        assert_eq!(job.items.len(), 1);
        assert_eq!(job.items[0].description, "D");
        assert_eq!(job.items[0].id, 4);
    }

    #[test]
    fn delete_missing_job_is_an_error() {
        let mut store = Store::default();
        assert!(matches!(
            store.delete_job(42),
            Err(LedgerError::JobNotFound(42))
        ));
    }

    #[test]
    fn expenditure_total_recomputed_on_edit() {
        let mut store = Store::default();
        let id = store.add_expenditure("Diesel", 4.0, 10.0, "admin", at(2026, 3, 2));
        assert_eq!(store.expenditure(id).unwrap().total, 40.0);

        store.edit_expenditure(id, "Diesel", 2.0, 10.0).unwrap();
        assert_eq!(store.expenditure(id).unwrap().total, 20.0);
    }

    #[test]
    fn listing_is_filtered_and_newest_first() {
        let mut store = Store::default();
        store.add_job(
            "Old",
            JobStatus::Completed,
            PaymentMethod::Cash,
            vec![],
            "admin",
            at(2026, 2, 1),
        );
        store.add_job(
            "New",
            JobStatus::Completed,
            PaymentMethod::Cash,
            vec![],
            "admin",
            at(2026, 3, 10),
        );

        let window = DateWindow {
            start: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            end: None,
        };
        let listed = store.jobs_in(&window);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].customer_name, "New");

        let window = DateWindow {
            start: Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            end: None,
        };
        assert_eq!(store.jobs_in(&window).len(), 1);
    }

    #[test]
    fn item_spec_parsing() {
        let parsed = ItemInput::parse("Oil change:2:1500").unwrap();
        assert_eq!(parsed.description, "Oil change");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.price, 1500.0);

        assert!(matches!(
            ItemInput::parse("Oil change:2"),
            Err(LedgerError::InvalidItemFormat(_))
        ));
        assert!(matches!(
            ItemInput::parse("Oil change:abc:10"),
            Err(LedgerError::InvalidNumber { field: "quantity", .. })
        ));
        assert!(matches!(
            ItemInput::parse("Oil change:0:10"),
            Err(LedgerError::InvalidNumber { field: "quantity", .. })
        ));
        assert!(matches!(
            ItemInput::parse(":2:10"),
            Err(LedgerError::InvalidItemFormat(_))
        ));
    }
}
