use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

/// A smart home device. Device-specific readings (temperature, brightness, ...)
/// are kept as free-form attributes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: String,
    pub location: String,
    pub image: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Slide {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Read-only catalog data compiled into the binary.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    pub devices: Vec<Device>,
    pub slides: Vec<Slide>,
    pub services: Vec<Service>,
}

/// Device id from a path segment. Leading whitespace is skipped and parsing
/// stops at the first non-digit, so `1abc` is device 1.
pub fn parse_device_id(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

impl Catalog {
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(CATALOG_JSON)
    }

    pub fn device(&self, id: u32) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn devices_of_type(&self, device_type: &str) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| d.device_type.eq_ignore_ascii_case(device_type))
            .cloned()
            .collect()
    }

    pub fn devices_with_status(&self, status: &str) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| d.status.eq_ignore_ascii_case(status))
            .cloned()
            .collect()
    }
}
