//! # Share Links
//!
//! Encodes a [`FrameConfiguration`] as an `application/x-www-form-urlencoded`
//! query string and restores it. Dimensions travel in the same fractional
//! form the customer types (`16 1/2`), enums as their ids.
//!
//! Decoding is forgiving: unknown keys are ignored, and a value that cannot
//! be read keeps its default and adds a [`NoticeKind::LinkValueIgnored`]
//! notice. Only an unknown layout id is an error.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::configuration::FrameConfiguration;
//! use frame_core::share_link::{decode, encode};
//!
//! let config = FrameConfiguration::new(16.5, 20.0, "natural-oak");
//! let query = encode(&config);
//! assert!(query.contains("width=16+1%2F2"));
//!
//! let (restored, notices) = decode(&query).unwrap();
//! assert_eq!(restored, config);
//! assert!(notices.is_empty());
//! ```

use std::collections::HashMap;

use url::form_urlencoded;

use crate::configuration::{FrameConfiguration, Hardware, MatType, ServiceType};
use crate::dimensions::{format_dimension, parse_dimension};
use crate::errors::FrameResult;
use crate::layouts::{CustomSize, LayoutSpec};
use crate::nameplate::{NameplateColor, NameplateConfig, NameplateFont};
use crate::notices::{Notice, NoticeKind};

pub fn encode(config: &FrameConfiguration) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("service", config.service_type.id());
    query.append_pair("width", &format_dimension(config.artwork_width_in));
    query.append_pair("height", &format_dimension(config.artwork_height_in));
    query.append_pair("frame", &config.frame_style_id);
    query.append_pair("layout", &config.layout.layout_id());

    match &config.layout {
        LayoutSpec::Diploma {
            photo_size: Some(size), ..
        } => {
            query.append_pair("photoSize", size);
        }
        LayoutSpec::Wedding {
            secondary_size,
            custom_secondary,
            ..
        } => {
            if let Some(size) = secondary_size {
                query.append_pair("secondarySize", size);
            }
            if let Some(custom) = custom_secondary {
                query.append_pair("customWidth", &format_dimension(custom.width_in));
                query.append_pair("customHeight", &format_dimension(custom.height_in));
            }
        }
        _ => {}
    }

    query.append_pair("mat", config.mat_type.id());
    if let Some(color) = &config.mat_color_id {
        query.append_pair("matColor", color);
    }
    if let Some(color) = &config.mat_inner_color_id {
        query.append_pair("matInnerColor", color);
    }
    query.append_pair("matBorder", &format_dimension(config.mat_border_in));
    if config.mat_reveal_in > 0.0 {
        query.append_pair("matReveal", &format_dimension(config.mat_reveal_in));
    }
    if config.bottom_weighted {
        query.append_pair("bottomWeighted", "true");
    }
    query.append_pair("glass", &config.glazing_id);
    query.append_pair("hardware", config.hardware.id());
    if let Some(url) = &config.image_url {
        query.append_pair("imageUrl", url);
    }
    if let Some(source) = &config.order_source {
        query.append_pair("orderSource", source);
    }

    if let Some(plate) = &config.nameplate {
        query.append_pair("nameplateEnabled", bool_str(plate.enabled));
        for (key, line) in ["nameplateLine1", "nameplateLine2", "nameplateLine3"].into_iter().zip(plate.lines()) {
            if !line.is_empty() {
                query.append_pair(key, line);
            }
        }
        query.append_pair("nameplateFont", plate.font.id());
        query.append_pair("nameplateColor", plate.color.id());
        if plate.include_flag {
            query.append_pair("nameplateFlag", "true");
        }
    }

    query.finish()
}

/// Restore a configuration from a query string, with or without the `?`.
pub fn decode(query: &str) -> FrameResult<(FrameConfiguration, Vec<Notice>)> {
    let query = query.trim().trim_start_matches('?');
    let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    let mut reader = LinkReader {
        params: &params,
        notices: Vec::new(),
    };

    let mut config = FrameConfiguration {
        mat_color_id: None,
        ..FrameConfiguration::default()
    };

    if let Some(service) = reader.parsed("service", ServiceType::from_id) {
        config.service_type = service;
    }
    if let Some(width) = reader.dimension("width") {
        config.artwork_width_in = width;
    }
    if let Some(height) = reader.dimension("height") {
        config.artwork_height_in = height;
    }
    if let Some(frame) = reader.text("frame") {
        config.frame_style_id = frame;
    }

    if let Some(layout_id) = reader.text("layout") {
        let size = reader.text("photoSize").or_else(|| reader.text("secondarySize"));
        let mut layout = LayoutSpec::from_layout_id(&layout_id, size.as_deref())?;
        if let LayoutSpec::Wedding { custom_secondary, .. } = &mut layout {
            if let (Some(width_in), Some(height_in)) = (reader.dimension("customWidth"), reader.dimension("customHeight")) {
                *custom_secondary = Some(CustomSize { width_in, height_in });
            }
        }
        config.layout = layout;
    }

    if let Some(mat) = reader.parsed("mat", MatType::from_id) {
        config.mat_type = mat;
    }
    config.mat_color_id = reader.text("matColor");
    config.mat_inner_color_id = reader.text("matInnerColor");
    if let Some(border) = reader.measurement("matBorder") {
        config.mat_border_in = border;
    }
    if let Some(reveal) = reader.measurement("matReveal") {
        config.mat_reveal_in = reveal;
    }
    if let Some(weighted) = reader.flag("bottomWeighted") {
        config.bottom_weighted = weighted;
    }
    if let Some(glass) = reader.text("glass") {
        config.glazing_id = glass;
    }
    if let Some(hardware) = reader.parsed("hardware", Hardware::from_id) {
        config.hardware = hardware;
    }
    config.image_url = reader.text("imageUrl");
    config.order_source = reader.text("orderSource");

    const NAMEPLATE_KEYS: [&str; 7] = [
        "nameplateEnabled",
        "nameplateLine1",
        "nameplateLine2",
        "nameplateLine3",
        "nameplateFont",
        "nameplateColor",
        "nameplateFlag",
    ];
    if NAMEPLATE_KEYS.iter().any(|k| params.contains_key(*k)) {
        let plate = NameplateConfig {
            enabled: reader.flag("nameplateEnabled").unwrap_or(false),
            line1: reader.text("nameplateLine1").unwrap_or_default(),
            line2: reader.text("nameplateLine2").unwrap_or_default(),
            line3: reader.text("nameplateLine3").unwrap_or_default(),
            font: reader.parsed("nameplateFont", NameplateFont::from_id).unwrap_or_default(),
            color: reader.parsed("nameplateColor", NameplateColor::from_id).unwrap_or_default(),
            include_flag: reader.flag("nameplateFlag").unwrap_or(false),
        };
        config.nameplate = Some(plate);
    }

    Ok((config, reader.notices))
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

struct LinkReader<'a> {
    params: &'a HashMap<String, String>,
    notices: Vec<Notice>,
}

impl LinkReader<'_> {
    /// Non-empty value for a key.
    fn text(&self, key: &str) -> Option<String> {
        self.params
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn ignore(&mut self, key: &str, value: &str) {
        self.notices.push(Notice::new(
            NoticeKind::LinkValueIgnored,
            key,
            format!("Ignored unreadable {key} value \"{value}\" from the link"),
        ));
    }

    fn parsed<T>(&mut self, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        let value = self.text(key)?;
        let parsed = parse(&value);
        if parsed.is_none() {
            self.ignore(key, &value);
        }
        parsed
    }

    /// Positive dimension.
    fn dimension(&mut self, key: &str) -> Option<f64> {
        let value = self.text(key)?;
        let parsed = parse_dimension(&value);
        if parsed > 0.0 {
            Some(parsed)
        } else {
            self.ignore(key, &value);
            None
        }
    }

    /// Non-negative measurement; "0" is a valid border.
    fn measurement(&mut self, key: &str) -> Option<f64> {
        let value = self.text(key)?;
        let parsed = parse_dimension(&value);
        let zero = value.trim_end_matches('"').chars().all(|c| c == '0' || c == '.');
        if parsed > 0.0 || zero {
            Some(parsed)
        } else {
            self.ignore(key, &value);
            None
        }
    }

    fn flag(&mut self, key: &str) -> Option<bool> {
        self.parsed(key, |v| match v {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> FrameConfiguration {
        FrameConfiguration {
            service_type: ServiceType::PrintAndFrame,
            mat_type: MatType::Double,
            mat_border_in: 2.75,
            mat_reveal_in: 0.25,
            mat_color_id: Some("cream".to_string()),
            mat_inner_color_id: Some("gold-foil".to_string()),
            glazing_id: "museum".to_string(),
            hardware: Hardware::Security,
            image_url: Some("https://cdn.example.com/u/7 final.jpg".to_string()),
            order_source: Some("diploma-landing".to_string()),
            bottom_weighted: true,
            nameplate: Some(NameplateConfig {
                enabled: true,
                line1: "Jane Q. Graduate".to_string(),
                line2: "Class of 2026 & Honors".to_string(),
                line3: String::new(),
                font: NameplateFont::TrajanPro,
                color: NameplateColor::BlackGold,
                include_flag: true,
            }),
            layout: LayoutSpec::from_layout_id("diploma-tassel-photo", Some("8x10")).unwrap(),
            ..FrameConfiguration::new(14.0, 11.0, "walnut-shadowbox")
        }
    }

    #[test]
    fn test_round_trip() {
        let config = full_config();
        let (restored, notices) = decode(&encode(&config)).unwrap();
        assert!(notices.is_empty());
        assert_eq!(restored, config);
    }

    #[test]
    fn test_wedding_custom_and_ticket_round_trip() {
        let wedding = FrameConfiguration {
            layout: LayoutSpec::Wedding {
                layout: crate::layouts::WeddingLayout::InvitePhoto,
                secondary_size: None,
                custom_secondary: Some(CustomSize {
                    width_in: 6.5,
                    height_in: 9.0,
                }),
            },
            ..FrameConfiguration::new(5.0, 7.0, "white-gallery")
        };
        assert_eq!(decode(&encode(&wedding)).unwrap().0, wedding);

        let ticket = FrameConfiguration {
            layout: LayoutSpec::from_layout_id("concert-poster-tickets-18x24", None).unwrap(),
            ..FrameConfiguration::default()
        };
        let query = encode(&ticket);
        assert!(query.contains("layout=concert-poster-tickets-18x24"));
        assert_eq!(decode(&query).unwrap().0, ticket);
    }

    #[test]
    fn test_sixteenth_measurements_survive_link() {
        let config = FrameConfiguration {
            mat_type: MatType::Double,
            mat_reveal_in: 0.1875,
            mat_border_in: 2.0625,
            ..FrameConfiguration::new(10.1875, 1.0 / 3.0 + 8.0, "black-classic")
        };
        let (restored, _) = decode(&encode(&config)).unwrap();
        assert_eq!(restored.mat_reveal_in, 0.1875);
        assert_eq!(restored.mat_border_in, 2.0625);
        assert_eq!(restored.artwork_width_in, 10.1875);
        assert_eq!(restored, config);
    }

    #[test]
    fn test_unreadable_values_fall_back() {
        let (config, notices) = decode("?width=abc&height=10&mat=triple&matBorder=-2&foo=bar").unwrap();
        assert_eq!(config.artwork_width_in, 11.0);
        assert_eq!(config.artwork_height_in, 10.0);
        assert_eq!(config.mat_type, MatType::Single);
        assert_eq!(config.mat_border_in, 2.0);
        let fields: Vec<&str> = notices.iter().map(|n| n.field.as_str()).collect();
        assert_eq!(fields, ["width", "mat", "matBorder"]);
        assert!(notices.iter().all(|n| n.kind == NoticeKind::LinkValueIgnored));
    }

    #[test]
    fn test_zero_border_accepted() {
        let (config, notices) = decode("matBorder=0&mat=none").unwrap();
        assert!(notices.is_empty());
        assert_eq!(config.mat_border_in, 0.0);
        assert_eq!(config.mat_type, MatType::None);
    }

    #[test]
    fn test_unknown_layout_is_error() {
        let err = decode("layout=triptych").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_LAYOUT");
    }

    #[test]
    fn test_special_characters_encoded() {
        let query = encode(&full_config());
        assert!(query.contains("nameplateLine2=Class+of+2026+%26+Honors"));
        assert!(!query.contains("nameplateLine3"));
    }
}
