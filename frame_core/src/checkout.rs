//! # Checkout Line Items
//!
//! Flattens a priced quote into the key/value attributes the cart and the
//! back office read. Attributes are human-readable and ordered the way the
//! order sheet prints them; the last one is the full configuration as JSON
//! so an order can always be reproduced exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::configuration::{FrameConfiguration, Hardware, MatType, ServiceType};
use crate::dimensions::{format_inches, parse_dimension};
use crate::engine::Quote;
use crate::errors::{FrameError, FrameResult};
use crate::layouts::LayoutSpec;
use crate::units::Usd;

/// Key of the attribute carrying the configuration JSON
pub const CONFIGURATION_KEY: &str = "Configuration";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub quantity: u32,
    pub price: Usd,
    pub attributes: Vec<CartAttribute>,
}

impl CartLineItem {
    /// Build a cart line from an orderable quote.
    ///
    /// Quotes over the hard cap, unpriceable quotes and quotes with any
    /// validation message are refused with [`FrameError::CheckoutRejected`].
    pub fn from_quote(quote: &Quote, config: &FrameConfiguration, catalog: &Catalog) -> FrameResult<Self> {
        if quote.exceeds_hard_cap() {
            return Err(FrameError::checkout_rejected(
                "Frame is larger than we can ship; contact us for custom quote",
            ));
        }
        if let Some(problem) = quote.validation.first() {
            return Err(FrameError::checkout_rejected(problem.message.clone()));
        }
        if !quote.pricing.priceable {
            return Err(FrameError::checkout_rejected("Configuration cannot be priced"));
        }

        let mut attrs = Attributes::default();
        let config = config.normalized();
        let selections = &quote.selections;

        attrs.push("Service Type", service_label(config.service_type));
        if let Some(source) = &config.order_source {
            attrs.push("Order Source", source);
        }

        let (width, height) = if config.layout.uses_artwork_size() {
            (config.artwork_width_in, config.artwork_height_in)
        } else {
            let layout = &quote.geometry.layout;
            (layout.envelope_width_in, layout.envelope_height_in)
        };
        attrs.push("Artwork Width", format_inches(width));
        attrs.push("Artwork Height", format_inches(height));

        let style = catalog.frame_style(&selections.frame_style_id)?;
        attrs.push("Frame Style", &style.name);

        attrs.push("Mat Type", mat_label(config.mat_type));
        if config.mat_type.has_mat() {
            attrs.push("Mat Border Width", format_inches(config.mat_border_in));
            if let Some(id) = &selections.mat_id {
                let mat = catalog.mat(id)?;
                attrs.push("Mat Color", &mat.name);
                let (width, height) = (quote.geometry.mat_width_in(), quote.geometry.mat_height_in());
                if let Some(sheet) = mat.sheet_for(width, height) {
                    attrs.push("Mat SKU", &sheet.sku);
                }
            }
            if config.mat_type == MatType::Double {
                attrs.push("Mat Reveal", format_inches(config.reveal_in()));
                if let Some(id) = &selections.inner_mat_id {
                    attrs.push("Mat Inner Color", &catalog.mat(id)?.name);
                }
            }
        }

        attrs.push("Glass Type", &catalog.glazing(&selections.glazing_id)?.name);
        attrs.push("Hardware", hardware_label(config.hardware));
        attrs.push("Layout", quote.geometry.layout.layout_id.as_str());

        if quote.geometry.nameplate.is_some() {
            if let Some(plate) = &config.nameplate {
                for (n, line) in plate.lines().into_iter().enumerate() {
                    if !line.trim().is_empty() {
                        attrs.push(&format!("Nameplate Line {}", n + 1), line);
                    }
                }
                attrs.push("Nameplate Font", plate.font.id());
                attrs.push("Nameplate Color", plate.color.id());
            }
        }

        if config.wants_print() {
            if let Some(url) = &config.image_url {
                attrs.push("Customer Image", url);
            }
        }
        if config.bottom_weighted {
            attrs.push("Bottom Weighted", "Yes");
        }

        attrs.push(CONFIGURATION_KEY, serde_json::to_string(&config)?);

        Ok(CartLineItem {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quantity: 1,
            price: quote.pricing.total,
            attributes: attrs.0,
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Configuration that produced this line.
    ///
    /// Reads the JSON attribute when present. Older lines without it are
    /// rebuilt from the readable attributes, looking catalog names back up.
    pub fn configuration(&self, catalog: &Catalog) -> FrameResult<FrameConfiguration> {
        if let Some(json) = self.attribute(CONFIGURATION_KEY) {
            return Ok(serde_json::from_str(json)?);
        }

        let required = |key: &str| {
            self.attribute(key)
                .ok_or_else(|| FrameError::invalid_input(key, "", "attribute missing from line item"))
        };
        let inches = |key: &str| -> FrameResult<f64> {
            let value = required(key)?;
            match parse_dimension(value) {
                v if v > 0.0 => Ok(v),
                _ => Err(FrameError::invalid_input(key, value, "not a dimension")),
            }
        };

        let style_name = required("Frame Style")?;
        let style = catalog
            .frames
            .iter()
            .find(|f| f.name == style_name)
            .ok_or_else(|| FrameError::not_found("frame style", style_name))?;
        let glass_name = required("Glass Type")?;
        let glazing = catalog
            .glass
            .iter()
            .find(|g| g.name == glass_name)
            .ok_or_else(|| FrameError::not_found("glazing", glass_name))?;
        let mat_id = |key: &str| {
            self.attribute(key)
                .and_then(|name| catalog.mats.iter().find(|m| m.name == name))
                .map(|m| m.id.clone())
        };

        let mat_type = match required("Mat Type")? {
            "None" => MatType::None,
            "Double" => MatType::Double,
            _ => MatType::Single,
        };

        let mut config = FrameConfiguration {
            service_type: if self.attribute("Service Type") == Some(service_label(ServiceType::PrintAndFrame)) {
                ServiceType::PrintAndFrame
            } else {
                ServiceType::FrameOnly
            },
            mat_type,
            mat_border_in: self.attribute("Mat Border Width").map_or(0.0, parse_dimension),
            mat_reveal_in: self.attribute("Mat Reveal").map_or(0.0, parse_dimension),
            mat_color_id: mat_id("Mat Color"),
            mat_inner_color_id: mat_id("Mat Inner Color"),
            glazing_id: glazing.id.clone(),
            hardware: if self.attribute("Hardware") == Some(hardware_label(Hardware::Security)) {
                Hardware::Security
            } else {
                Hardware::Standard
            },
            image_url: self.attribute("Customer Image").map(str::to_string),
            bottom_weighted: self.attribute("Bottom Weighted") == Some("Yes"),
            order_source: self.attribute("Order Source").map(str::to_string),
            ..FrameConfiguration::new(inches("Artwork Width")?, inches("Artwork Height")?, style.id.clone())
        };
        if let Some(layout_id) = self.attribute("Layout") {
            config.layout = LayoutSpec::from_layout_id(layout_id, None)?;
        }
        Ok(config)
    }
}

fn service_label(service: ServiceType) -> &'static str {
    match service {
        ServiceType::FrameOnly => "Frame Only",
        ServiceType::PrintAndFrame => "Print & Frame",
    }
}

fn mat_label(mat_type: MatType) -> &'static str {
    match mat_type {
        MatType::None => "None",
        MatType::Single => "Single",
        MatType::Double => "Double",
    }
}

fn hardware_label(hardware: Hardware) -> &'static str {
    match hardware {
        Hardware::Standard => "Standard",
        Hardware::Security => "Security",
    }
}

#[derive(Default)]
struct Attributes(Vec<CartAttribute>);

impl Attributes {
    fn push(&mut self, key: &str, value: impl AsRef<str>) {
        self.0.push(CartAttribute {
            key: key.to_string(),
            value: value.as_ref().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::engine::compute;
    use crate::nameplate::NameplateConfig;

    fn line_for(config: &FrameConfiguration) -> FrameResult<CartLineItem> {
        let catalog = default_catalog().unwrap();
        let quote = compute(config, catalog).unwrap();
        CartLineItem::from_quote(&quote, config, catalog)
    }

    fn keys(item: &CartLineItem) -> Vec<&str> {
        item.attributes.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_attribute_order() {
        let config = FrameConfiguration {
            mat_type: MatType::Double,
            mat_border_in: 2.5,
            mat_reveal_in: 0.25,
            mat_inner_color_id: Some("black".to_string()),
            bottom_weighted: true,
            order_source: Some("spring-sale".to_string()),
            ..FrameConfiguration::new(12.5, 16.0, "natural-oak")
        };
        let item = line_for(&config).unwrap();
        assert_eq!(
            keys(&item),
            [
                "Service Type",
                "Order Source",
                "Artwork Width",
                "Artwork Height",
                "Frame Style",
                "Mat Type",
                "Mat Border Width",
                "Mat Color",
                "Mat SKU",
                "Mat Reveal",
                "Mat Inner Color",
                "Glass Type",
                "Hardware",
                "Layout",
                "Bottom Weighted",
                "Configuration",
            ]
        );
        assert_eq!(item.attribute("Artwork Width"), Some("12.5\""));
        assert_eq!(item.attribute("Mat Reveal"), Some("0.25\""));
        assert_eq!(item.attribute("Mat SKU"), Some("M-white-3240"));
        assert_eq!(item.attribute("Bottom Weighted"), Some("Yes"));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_nameplate_lines() {
        let config = FrameConfiguration {
            nameplate: Some(NameplateConfig {
                enabled: true,
                line1: "Jordan Lee".to_string(),
                line3: "2026".to_string(),
                ..Default::default()
            }),
            ..FrameConfiguration::default()
        };
        let item = line_for(&config).unwrap();
        assert_eq!(item.attribute("Nameplate Line 1"), Some("Jordan Lee"));
        assert_eq!(item.attribute("Nameplate Line 2"), None);
        assert_eq!(item.attribute("Nameplate Line 3"), Some("2026"));
    }

    #[test]
    fn test_over_cap_rejected() {
        let err = line_for(&FrameConfiguration::new(40.0, 58.0, "black-classic")).unwrap_err();
        assert_eq!(err.error_code(), "CHECKOUT_REJECTED");
        assert!(err.to_string().contains("contact us for custom quote"));
    }

    #[test]
    fn test_unpriceable_rejected() {
        assert!(line_for(&FrameConfiguration::new(2.0, 2.0, "black-classic")).is_err());
    }

    #[test]
    fn test_configuration_round_trip() {
        let catalog = default_catalog().unwrap();
        let config = FrameConfiguration::new(16.0, 20.0, "walnut-wide");
        let item = line_for(&config).unwrap();
        assert_eq!(item.configuration(catalog).unwrap(), config.normalized());
    }

    #[test]
    fn test_configuration_from_readable_attributes() {
        let catalog = default_catalog().unwrap();
        let config = FrameConfiguration {
            hardware: Hardware::Security,
            ..FrameConfiguration::new(16.0, 20.0, "walnut-wide")
        };
        let mut item = line_for(&config).unwrap();
        item.attributes.retain(|a| a.key != CONFIGURATION_KEY);
        let rebuilt = item.configuration(catalog).unwrap();
        assert_eq!(rebuilt.frame_style_id, "walnut-wide");
        assert_eq!(rebuilt.artwork_width_in, 16.0);
        assert_eq!(rebuilt.mat_color_id.as_deref(), Some("white"));
        assert_eq!(rebuilt.hardware, Hardware::Security);
        assert_eq!(rebuilt.mat_border_in, 2.0);
    }
}
