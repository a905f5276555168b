//! AlertFactory: category → constructor map, resolved at startup.

use std::collections::HashMap;

use vitals_core::errors::FactoryError;
use vitals_core::models::{Alert, AlertCategory, PatientId, TimestampMs};

/// Builds the alert value for one category.
pub type AlertConstructor = Box<dyn Fn(PatientId, String, TimestampMs) -> Alert + Send + Sync>;

/// Maps each alert category to its constructor.
///
/// The default factory knows all four categories. A custom factory starts
/// from [`AlertFactory::empty`] and registers only what it needs; asking it
/// for anything else fails with `FactoryError::UnknownCategory`.
pub struct AlertFactory {
    constructors: HashMap<AlertCategory, AlertConstructor>,
}

impl AlertFactory {
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `category`.
    pub fn register<F>(&mut self, category: AlertCategory, constructor: F)
    where
        F: Fn(PatientId, String, TimestampMs) -> Alert + Send + Sync + 'static,
    {
        self.constructors.insert(category, Box::new(constructor));
    }

    pub fn create(
        &self,
        category: AlertCategory,
        patient_id: PatientId,
        condition: impl Into<String>,
        timestamp: TimestampMs,
    ) -> Result<Alert, FactoryError> {
        let constructor =
            self.constructors
                .get(&category)
                .ok_or_else(|| FactoryError::UnknownCategory {
                    category: category.tag().to_string(),
                })?;
        Ok(constructor(patient_id, condition.into(), timestamp))
    }

    /// Like [`create`](Self::create) but resolves a case-insensitive tag
    /// such as `"bloodpressure"` or `"ECG"`.
    pub fn create_by_tag(
        &self,
        tag: &str,
        patient_id: PatientId,
        condition: impl Into<String>,
        timestamp: TimestampMs,
    ) -> Result<Alert, FactoryError> {
        let category = AlertCategory::from_tag(tag).ok_or_else(|| FactoryError::UnknownCategory {
            category: tag.to_string(),
        })?;
        self.create(category, patient_id, condition, timestamp)
    }

    pub fn supports(&self, category: AlertCategory) -> bool {
        self.constructors.contains_key(&category)
    }
}

impl Default for AlertFactory {
    fn default() -> Self {
        let mut factory = Self::empty();
        for &category in AlertCategory::all() {
            factory.register(category, move |patient_id, condition, timestamp| {
                Alert::new(patient_id, category, condition, timestamp)
            });
        }
        factory
    }
}

impl std::fmt::Debug for AlertFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut categories: Vec<&str> = self.constructors.keys().map(|c| c.tag()).collect();
        categories.sort_unstable();
        f.debug_struct("AlertFactory")
            .field("categories", &categories)
            .finish()
    }
}
