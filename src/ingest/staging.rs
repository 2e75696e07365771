//! The staging document written by `parse-pages` and replayed by the ingester:
//!
//! ```json
//! { "H01234567890": { "shipping_cost": 199.0, ..., "products": { "1": { ... } } } }
//! ```
//!
//! Entry order is significant (the ingester replays in document order), so
//! both maps keep the order they were read in.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use crate::dto::{CreateProduct, CreateShipment};
use crate::errors::ServiceError;

/// String-keyed entries in document order. Later duplicates of a key replace
/// the earlier value in place, the way a JSON object reader would.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedEntries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedEntries<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Serialize> Serialize for OrderedEntries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedEntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntriesVisitor<V> {
    type Value = OrderedEntries<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = OrderedEntries(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.insert(key, value);
        }
        Ok(entries)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedEntriesVisitor(PhantomData))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagedProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub purchase_status: Option<String>,
}

impl StagedProduct {
    pub fn to_create(&self, shipment_num: &str) -> CreateProduct {
        CreateProduct {
            product_name: self.product_name.clone(),
            quantity: self.quantity.clone(),
            purchase_price: self.purchase_price,
            purchase_status: self.purchase_status.clone(),
            shipment_num: shipment_num.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagedShipment {
    #[serde(default)]
    pub shipment_status: Option<String>,
    #[serde(default)]
    pub shipment_date: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    /// Absent when the page did not show a total; such entries cannot be loaded
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub bonuses: Option<i32>,
    #[serde(default)]
    pub assembly_and_delivery: Option<i32>,
    #[serde(default)]
    pub discount: Option<f64>,
    /// Shown on the page but not loaded into the store
    #[serde(default)]
    pub shipment_merchant: Option<String>,
    /// Keyed by page-local id ("1", "2", ...)
    #[serde(default)]
    pub products: OrderedEntries<StagedProduct>,
}

impl StagedShipment {
    pub fn to_create(&self, shipment_num: &str) -> Result<CreateShipment, ServiceError> {
        let shipping_cost = self.shipping_cost.ok_or_else(|| {
            ServiceError::StagingError(format!("shipment {shipment_num} has no shipping_cost"))
        })?;
        Ok(CreateShipment {
            shipment_num: shipment_num.to_string(),
            shipment_status: self.shipment_status.clone(),
            shipment_date: self.shipment_date.clone(),
            shipping_address: self.shipping_address.clone(),
            shipping_cost,
            bonuses: self.bonuses,
            assembly_and_delivery: self.assembly_and_delivery,
            discount: self.discount,
        })
    }
}

/// Whole staging document keyed by shipment number
pub type StagingDocument = OrderedEntries<StagedShipment>;

/// Reads and parses a staging document.
pub async fn load_staging(path: &Path) -> Result<StagingDocument, ServiceError> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        ServiceError::StagingError(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_slice(&raw).map_err(|e| {
        ServiceError::StagingError(format!("malformed staging file {}: {}", path.display(), e))
    })
}

/// Writes a staging document as pretty-printed JSON, creating parent
/// directories as needed.
pub async fn save_staging(path: &Path, document: &StagingDocument) -> Result<(), ServiceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ServiceError::StagingError(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| ServiceError::StagingError(format!("cannot encode staging document: {e}")))?;
    tokio::fs::write(path, json).await.map_err(|e| {
        ServiceError::StagingError(format!("cannot write {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "H300": {"shipping_cost": 30.0, "products": {}},
        "H100": {
            "shipment_status": "Заказ доставлен",
            "shipment_date": "2024-03-12",
            "shipping_cost": 100.0,
            "bonuses": 10,
            "products": {
                "2": {"product_name": "Хлеб"},
                "1": {"product_name": "Молоко", "quantity": "2 шт", "purchase_price": 89.9}
            }
        },
        "H200": {"shipping_cost": 20.0}
    }"#;

    #[test]
    fn keeps_document_order() {
        let doc: StagingDocument = serde_json::from_str(DOCUMENT).unwrap();
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["H300", "H100", "H200"]);

        let products: Vec<&str> = doc.get("H100").unwrap().products.iter().map(|(k, _)| k).collect();
        assert_eq!(products, ["2", "1"]);
    }

    #[test]
    fn merchant_is_read_and_written_but_not_loaded() {
        let doc: StagingDocument = serde_json::from_str(
            r#"{"H1": {"shipping_cost": 1.0, "shipment_merchant": "METRO", "products": {}}}"#,
        )
        .unwrap();
        let shipment = doc.get("H1").unwrap();
        assert_eq!(shipment.shipment_merchant.as_deref(), Some("METRO"));

        let json = serde_json::to_value(shipment).unwrap();
        assert_eq!(json["shipment_merchant"], "METRO");
        assert!(shipment.to_create("H1").is_ok());
    }

    #[test]
    fn missing_products_means_none() {
        let doc: StagingDocument = serde_json::from_str(DOCUMENT).unwrap();
        assert!(doc.get("H200").unwrap().products.is_empty());
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut doc = StagingDocument::new();
        doc.insert("B", StagedShipment::default());
        doc.insert("A", StagedShipment::default());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.find("\"B\"").unwrap() < json.find("\"A\"").unwrap());
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let doc: OrderedEntries<i32> = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(doc.0, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
    }

    #[test]
    fn shipment_without_cost_cannot_be_created() {
        let err = StagedShipment::default().to_create("H1").unwrap_err();
        assert!(matches!(err, ServiceError::StagingError(msg) if msg.contains("H1")));
    }

    #[test]
    fn product_gets_parent_shipment_number() {
        let product = StagedProduct {
            product_name: Some("Сыр".into()),
            ..Default::default()
        };
        assert_eq!(product.to_create("H9").shipment_num, "H9");
    }
}
