//! Catalog payloads: product search results, registration and
//! warehouse assignment

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::validation::{self, ValidationErrors};

/// A product stocked in a warehouse, as returned by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_name: String,
    pub manufacturer_name: String,
    #[serde(default)]
    pub product_image_link: Option<String>,
    pub wid: String,
    pub pid: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub discount: Decimal,
    #[serde(default)]
    pub total_quantity: u32,
}

impl Product {
    /// Discount percentage as sent, clamped to 0..=100
    pub fn effective_discount(&self) -> Decimal {
        self.discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Price after the percentage discount, rounded to two decimals
    ///
    /// Falls back to the base price if the arithmetic would overflow.
    pub fn discounted_price(&self) -> Decimal {
        Decimal::ONE_HUNDRED
            .checked_sub(self.effective_discount())
            .and_then(|pct| self.base_price.checked_mul(pct))
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or(self.base_price)
            .round_dp(2)
    }

    pub fn has_discount(&self) -> bool {
        self.effective_discount() > Decimal::ZERO
    }

    pub fn in_stock(&self) -> bool {
        self.total_quantity > 0
    }
}

/// Search input; a blank term lists everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: Option<String>,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        let trimmed = term.trim();
        Self {
            term: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }
}

/// Product registration request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub manufacturer_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub product_image_link: String,
}

/// Product registration fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub product_name: String,
    pub manufacturer_name: String,
    pub quantity: String,
    pub base_price: String,
    pub product_image_link: String,
}

impl ProductForm {
    pub fn validate(&self) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = validation::required(
            &mut errors,
            "productName",
            &self.product_name,
            "Product name is required",
        );
        let manufacturer = validation::required(
            &mut errors,
            "manufacturerName",
            &self.manufacturer_name,
            "Manufacturer name is required",
        );
        let quantity =
            validation::non_negative_integer(&mut errors, "quantity", &self.quantity, "Quantity", Some(0));
        let base_price =
            validation::non_negative_decimal(&mut errors, "basePrice", &self.base_price, "Base price");

        let image = self.product_image_link.trim();
        if !image.is_empty() && Url::parse(image).is_err() {
            errors.add("productImageLink", "Product image link must be a valid URL");
        }

        match (name, manufacturer, quantity, base_price) {
            (Some(name), Some(manufacturer), Some(quantity), Some(base_price))
                if errors.is_empty() =>
            {
                Ok(NewProduct {
                    product_name: name.to_string(),
                    manufacturer_name: manufacturer.to_string(),
                    quantity,
                    base_price,
                    product_image_link: image.to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Product-to-warehouse assignment request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseItem {
    pub wid: Uuid,
    pub pid: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub total_quantity: u32,
}

/// Assignment fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    pub warehouse_id: String,
    pub product_id: String,
    pub base_price: String,
    pub discount: String,
    pub total_quantity: String,
}

fn uuid_field(errors: &mut ValidationErrors, field: &str, value: &str, label: &str) -> Option<Uuid> {
    let value = validation::required(errors, field, value, &format!("{} is required", label))?;
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, format!("{} must be a UUID", label));
            None
        }
    }
}

impl AssignmentForm {
    pub fn validate(&self) -> Result<WarehouseItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let wid = uuid_field(&mut errors, "warehouseId", &self.warehouse_id, "Warehouse ID");
        let pid = uuid_field(&mut errors, "productId", &self.product_id, "Product ID");
        let base_price =
            validation::non_negative_decimal(&mut errors, "basePrice", &self.base_price, "Base price");
        let discount =
            validation::non_negative_decimal(&mut errors, "discount", &self.discount, "Discount");
        if let Some(d) = discount {
            if d > Decimal::ONE_HUNDRED {
                errors.add("discount", "Discount cannot exceed 100");
            }
        }
        let total_quantity = validation::non_negative_integer(
            &mut errors,
            "totalQuantity",
            &self.total_quantity,
            "Total quantity",
            None,
        );

        match (wid, pid, base_price, discount, total_quantity) {
            (Some(wid), Some(pid), Some(base_price), Some(discount), Some(total_quantity))
                if errors.is_empty() =>
            {
                Ok(WarehouseItem {
                    wid,
                    pid,
                    base_price,
                    discount,
                    total_quantity,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(base: i64, discount: i64, quantity: u32) -> Product {
        Product {
            product_name: "Toor Dal".into(),
            manufacturer_name: "Tata".into(),
            product_image_link: None,
            wid: "w1".into(),
            pid: "p1".into(),
            is_available: quantity > 0,
            base_price: Decimal::new(base, 0),
            discount: Decimal::new(discount, 0),
            total_quantity: quantity,
        }
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(product(200, 10, 1).discounted_price(), Decimal::new(18000, 2));
        assert_eq!(product(99, 0, 1).discounted_price(), Decimal::new(99, 0));
        assert!(!product(99, 0, 1).has_discount());
    }

    #[test]
    fn test_out_of_range_discount_is_clamped() {
        assert_eq!(product(200, 150, 1).discounted_price(), Decimal::ZERO);
        let negative = product(200, -20, 1);
        assert_eq!(negative.discounted_price(), Decimal::new(200, 0));
        assert!(!negative.has_discount());
    }

    #[test]
    fn test_extreme_backend_values_do_not_panic() {
        let raw = r#"{
            "productName": "Ghee",
            "manufacturerName": "Amul",
            "wid": "w1",
            "pid": "p1",
            "basePrice": 1e15,
            "discount": -1e20
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.discounted_price(), product.base_price.round_dp(2));

        let huge = Product {
            base_price: Decimal::MAX,
            discount: Decimal::new(10, 0),
            ..product
        };
        assert_eq!(huge.discounted_price(), Decimal::MAX.round_dp(2));
    }

    #[test]
    fn test_stock() {
        assert!(product(1, 0, 3).in_stock());
        assert!(!product(1, 0, 0).in_stock());
    }

    #[test]
    fn test_product_parses_numeric_prices() {
        let raw = r#"{
            "productName": "Milk",
            "manufacturerName": "Amul",
            "productImageLink": "https://cdn.example.com/milk.png",
            "wid": "9b2f5d1c-0000-4000-8000-000000000001",
            "pid": "9b2f5d1c-0000-4000-8000-000000000002",
            "isAvailable": true,
            "basePrice": 28.5,
            "discount": 5,
            "totalQuantity": 40
        }"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.base_price, Decimal::new(285, 1));
        assert_eq!(p.total_quantity, 40);
    }

    #[test]
    fn test_search_query_trims() {
        assert_eq!(SearchQuery::new("  milk ").term(), Some("milk"));
        assert_eq!(SearchQuery::new("   ").term(), None);
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm {
            product_name: "Milk".into(),
            manufacturer_name: "Amul".into(),
            quantity: "".into(),
            base_price: "28".into(),
            product_image_link: "".into(),
        };
        let product = form.validate().unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.base_price, Decimal::new(28, 0));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["basePrice"], 28.0);
        assert_eq!(json["productImageLink"], "");
    }

    #[test]
    fn test_product_form_rejects_bad_input() {
        let form = ProductForm {
            product_name: "".into(),
            manufacturer_name: "Amul".into(),
            quantity: "-3".into(),
            base_price: "".into(),
            product_image_link: "not a url".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("productName").is_some());
        assert!(errors.get("quantity").is_some());
        assert_eq!(errors.get("basePrice"), Some("Base price is required"));
        assert!(errors.get("productImageLink").is_some());
    }

    #[test]
    fn test_assignment_form() {
        let form = AssignmentForm {
            warehouse_id: "9b2f5d1c-0000-4000-8000-000000000001".into(),
            product_id: "9b2f5d1c-0000-4000-8000-000000000002".into(),
            base_price: "120.00".into(),
            discount: "12.5".into(),
            total_quantity: "30".into(),
        };
        let item = form.validate().unwrap();
        assert_eq!(item.total_quantity, 30);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["wid"], "9b2f5d1c-0000-4000-8000-000000000001");
        assert_eq!(json["discount"], 12.5);
    }

    #[test]
    fn test_assignment_form_rejects_bad_ids_and_discount() {
        let form = AssignmentForm {
            warehouse_id: "warehouse-7".into(),
            product_id: "".into(),
            base_price: "10".into(),
            discount: "150".into(),
            total_quantity: "".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("warehouseId"), Some("Warehouse ID must be a UUID"));
        assert_eq!(errors.get("productId"), Some("Product ID is required"));
        assert_eq!(errors.get("discount"), Some("Discount cannot exceed 100"));
        assert_eq!(errors.get("totalQuantity"), Some("Total quantity is required"));
    }
}
