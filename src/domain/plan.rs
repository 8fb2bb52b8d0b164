use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product tier from the platform's plan catalog.
///
/// The catalog is owned by the backend; the flow only consumes it to validate
/// a checkout request before initiating a payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// Access duration in days; 0 means unlimited.
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.price == Decimal::ZERO
    }
}

/// The loaded plan catalog with lookup by plan id.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    pub fn find(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> PlanCatalog {
        PlanCatalog::new(vec![
            Plan {
                id: "gratuito".to_string(),
                name: "Gratuito/Trial".to_string(),
                price: dec!(0.00),
                duration_days: 0,
                features: vec!["3 questões limitadas".to_string()],
            },
            Plan {
                id: "premium".to_string(),
                name: "Premium (Mensal)".to_string(),
                price: dec!(49.90),
                duration_days: 30,
                features: vec!["Questões ilimitadas".to_string()],
            },
        ])
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.find("premium").unwrap().price, dec!(49.90));
        assert!(catalog.find("enterprise").is_none());
    }

    #[test]
    fn test_free_plan_detection() {
        let catalog = catalog();
        assert!(catalog.find("gratuito").unwrap().is_free());
        assert!(!catalog.find("premium").unwrap().is_free());
    }
}
