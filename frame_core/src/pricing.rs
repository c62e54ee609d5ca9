//! # Pricing
//!
//! Perimeter and area based pricing of an [`AggregatedGeometry`].
//!
//! Asymmetric borders (bottom weighting, nameplate minimum) are priced
//! through their average: a symmetric border of the average width has the
//! same perimeter as the real borders, so the frame and mat prices do not
//! depend on which side got the extra.
//!
//! Every line is rounded to cents and the total is the sum of the rounded
//! lines, so the displayed breakdown always adds up.

use serde::{Deserialize, Serialize};

use crate::catalog::{FrameStyle, GlassType, Mat, PricingConfig};
use crate::configuration::{FrameConfiguration, Hardware, MatType};
use crate::geometry::AggregatedGeometry;
use crate::layouts::{LayoutFamily, OpeningKind};
use crate::units::{SqFt, SqIn, Usd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComponent {
    Frame,
    Mat,
    Glazing,
    Print,
    PhotoPrint,
    Hardware,
    Nameplate,
    Oversize,
    PhotoOpening,
    TasselHook,
    ExtraOpenings,
    DoubleMat,
}

impl PriceComponent {
    pub fn label(&self) -> &'static str {
        match self {
            PriceComponent::Frame => "Frame",
            PriceComponent::Mat => "Mat",
            PriceComponent::Glazing => "Glazing",
            PriceComponent::Print => "Print",
            PriceComponent::PhotoPrint => "Photo print",
            PriceComponent::Hardware => "Security hardware",
            PriceComponent::Nameplate => "Engraved nameplate",
            PriceComponent::Oversize => "Oversize handling",
            PriceComponent::PhotoOpening => "Photo opening",
            PriceComponent::TasselHook => "Tassel hook",
            PriceComponent::ExtraOpenings => "Extra openings",
            PriceComponent::DoubleMat => "Double mat cutting",
        }
    }
}

/// One row of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub component: PriceComponent,
    pub label: String,
    pub amount: Usd,
    /// Shown as "included" rather than a price
    pub included: bool,
}

impl PriceLine {
    fn new(component: PriceComponent, label: impl Into<String>, amount: f64) -> Self {
        PriceLine {
            component,
            label: label.into(),
            amount: Usd(amount).to_cents(),
            included: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub lines: Vec<PriceLine>,
    pub total: Usd,
    /// False when the configuration cannot be priced; every amount is zero
    pub priceable: bool,
}

impl PricingBreakdown {
    fn from_lines(lines: Vec<PriceLine>) -> Self {
        let total = lines.iter().map(|l| l.amount).sum::<Usd>().to_cents();
        PricingBreakdown {
            lines,
            total,
            priceable: true,
        }
    }

    /// All-zero breakdown for a configuration that cannot be priced.
    pub fn not_priceable() -> Self {
        let lines = [PriceComponent::Frame, PriceComponent::Mat, PriceComponent::Glazing]
            .into_iter()
            .map(|component| PriceLine::new(component, component.label(), 0.0))
            .collect();
        PricingBreakdown {
            lines,
            total: Usd::ZERO,
            priceable: false,
        }
    }

    pub fn line(&self, component: PriceComponent) -> Option<&PriceLine> {
        self.lines.iter().find(|l| l.component == component)
    }

    /// Amount for a component, zero when absent.
    pub fn amount(&self, component: PriceComponent) -> Usd {
        self.line(component).map_or(Usd::ZERO, |l| l.amount)
    }
}

/// Everything a price depends on, with catalog selections already resolved.
#[derive(Debug, Clone, Copy)]
pub struct PricingInputs<'a> {
    pub geometry: &'a AggregatedGeometry,
    pub config: &'a FrameConfiguration,
    pub style: &'a FrameStyle,
    /// Outer mat, absent for mat type none
    pub mat: Option<&'a Mat>,
    /// Inner mat of a double mat
    pub inner_mat: Option<&'a Mat>,
    pub glazing: &'a GlassType,
    pub pricing: &'a PricingConfig,
}

/// Width and height used for perimeter and area pricing.
pub fn priced_size(geometry: &AggregatedGeometry) -> (f64, f64) {
    let avg = geometry.borders.average();
    let width = geometry.layout.envelope_width_in + 2.0 * avg + 2.0 * geometry.reveal_in;
    let height = geometry.layout.envelope_height_in + 2.0 * avg + 2.0 * geometry.reveal_in + geometry.plaque_extension_in;
    (width, height)
}

pub fn price(inputs: &PricingInputs) -> PricingBreakdown {
    let PricingInputs {
        geometry,
        config,
        style,
        mat,
        inner_mat,
        glazing,
        pricing,
    } = *inputs;
    let layout = &geometry.layout;
    let fees = &pricing.layout_fees;

    let (width, height) = priced_size(geometry);
    let perimeter = 2.0 * (width + height);
    let area = SqIn(width * height);

    let mut lines = Vec::new();

    // Frame
    let frame = layout.base_price.unwrap_or(perimeter * style.price_per_inch);
    lines.push(PriceLine::new(PriceComponent::Frame, format!("Frame ({})", style.name), frame));

    // Mat
    let mat_type = geometry.mat_type;
    let chosen: Vec<&Mat> = match mat_type {
        MatType::None => Vec::new(),
        MatType::Single => mat.into_iter().collect(),
        MatType::Double => mat.into_iter().chain(inner_mat).collect(),
    };
    // Ticket boards are cut to a fixed design; their mat is charged only
    // through the opening and double-mat surcharges
    let precut = layout.family == LayoutFamily::TicketStub;
    let mat_price = if mat_type.has_mat() && !precut {
        let rate = pricing.mat_price_per_inch + chosen.iter().map(|m| m.surcharge()).sum::<f64>();
        let premium = if chosen.iter().any(|m| m.is_premium) {
            pricing.premium_mat_multiplier
        } else {
            1.0
        };
        perimeter * rate * pricing.mat_multipliers.for_type(mat_type) * premium
    } else {
        0.0
    };
    let mat_label = match (mat_type, chosen.first()) {
        (MatType::None, _) => "No mat".to_string(),
        (_, Some(m)) => format!("{} mat ({})", capitalize(mat_type.id()), m.name),
        (_, None) => format!("{} mat", capitalize(mat_type.id())),
    };
    let mut mat_line = PriceLine::new(PriceComponent::Mat, mat_label, mat_price);
    mat_line.included = precut && mat_type.has_mat();
    lines.push(mat_line);

    // Glazing, never omitted
    let mut glazing_line = PriceLine::new(
        PriceComponent::Glazing,
        glazing.name.clone(),
        if glazing.backing_only {
            0.0
        } else {
            SqFt::from(area).value() * glazing.price_per_sq_ft
        },
    );
    glazing_line.included = glazing.backing_only;
    lines.push(glazing_line);

    if config.wants_print() {
        let (print_w, print_h) = if config.layout.uses_artwork_size() {
            (config.artwork_width_in, config.artwork_height_in)
        } else {
            layout.primary().map_or((0.0, 0.0), |o| (o.width_in, o.height_in))
        };
        lines.push(PriceLine::new(
            PriceComponent::Print,
            PriceComponent::Print.label(),
            print_w * print_h * pricing.print_price_per_sq_in,
        ));
        let photos = layout.count(OpeningKind::Photo);
        if photos > 0 {
            lines.push(PriceLine::new(
                PriceComponent::PhotoPrint,
                PriceComponent::PhotoPrint.label(),
                photos as f64 * fees.photo_print,
            ));
        }
    }

    if config.hardware == Hardware::Security {
        lines.push(PriceLine::new(
            PriceComponent::Hardware,
            PriceComponent::Hardware.label(),
            pricing.security_hardware_fee,
        ));
    }

    if geometry.nameplate.is_some() {
        lines.push(PriceLine::new(
            PriceComponent::Nameplate,
            PriceComponent::Nameplate.label(),
            pricing.nameplate.price,
        ));
    }

    if geometry.oversize.fee_applies {
        lines.push(PriceLine::new(
            PriceComponent::Oversize,
            PriceComponent::Oversize.label(),
            pricing.oversize.fee,
        ));
    }

    // Layout add-ons
    match layout.family {
        LayoutFamily::Diploma => {
            if layout.has(OpeningKind::Photo) && mat_type.has_mat() {
                lines.push(PriceLine::new(
                    PriceComponent::PhotoOpening,
                    PriceComponent::PhotoOpening.label(),
                    fees.photo_opening,
                ));
            }
            if layout.has(OpeningKind::Tassel) {
                lines.push(PriceLine::new(
                    PriceComponent::TasselHook,
                    PriceComponent::TasselHook.label(),
                    fees.tassel_hook,
                ));
            }
        }
        LayoutFamily::TicketStub if mat_type.has_mat() => {
            let extra = layout.openings.len().saturating_sub(1);
            if extra > 0 {
                lines.push(PriceLine::new(
                    PriceComponent::ExtraOpenings,
                    format!("Extra openings ({extra})"),
                    extra as f64 * fees.extra_opening,
                ));
            }
            if mat_type == MatType::Double {
                lines.push(PriceLine::new(
                    PriceComponent::DoubleMat,
                    PriceComponent::DoubleMat.label(),
                    fees.double_mat,
                ));
            }
        }
        _ => {}
    }

    PricingBreakdown::from_lines(lines)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borders::compute_borders;
    use crate::catalog::default_catalog;
    use crate::configuration::ServiceType;
    use crate::layouts::{resolve, LayoutSpec};
    use crate::nameplate::NameplateConfig;

    const EPS: f64 = 1e-9;

    fn quote(config: &FrameConfiguration) -> (AggregatedGeometry, PricingBreakdown) {
        let catalog = default_catalog().unwrap();
        let config = config.normalized();
        let style = catalog.frame_style(&config.frame_style_id).unwrap();
        let layout = resolve(&config.layout, config.artwork_width_in, config.artwork_height_in).layout;
        let outcome = compute_borders(&layout, &config, &catalog.pricing);
        let geometry = AggregatedGeometry::aggregate(
            layout,
            config.mat_type,
            &outcome,
            config.reveal_in(),
            style.moulding_width_in,
            &catalog.pricing,
        );
        let mat = config.mat_color_id.as_deref().map(|id| catalog.mat(id).unwrap());
        let inner_mat = config.mat_inner_color_id.as_deref().map(|id| catalog.mat(id).unwrap());
        let breakdown = price(&PricingInputs {
            geometry: &geometry,
            config: &config,
            style,
            mat,
            inner_mat,
            glazing: catalog.glazing(&config.glazing_id).unwrap(),
            pricing: &catalog.pricing,
        });
        (geometry, breakdown)
    }

    fn assert_sums(breakdown: &PricingBreakdown) {
        let sum: f64 = breakdown.lines.iter().map(|l| l.amount.value()).sum();
        assert!((breakdown.total.value() - sum).abs() < 1e-6);
        assert!(breakdown.lines.iter().all(|l| l.amount.value() >= 0.0));
    }

    #[test]
    fn test_single_mat_frame_and_glazing() {
        let config = FrameConfiguration::new(11.0, 14.0, "black-classic");
        let (_, breakdown) = quote(&config);
        let catalog = default_catalog().unwrap();
        let style = catalog.frame_style("black-classic").unwrap();

        // 15 x 18 priced size
        let perimeter = 2.0 * (15.0 + 18.0);
        let expected_frame = Usd(perimeter * style.price_per_inch).to_cents();
        assert_eq!(breakdown.amount(PriceComponent::Frame), expected_frame);

        let glass = catalog.glazing("standard").unwrap();
        let expected_glass = Usd(15.0 * 18.0 / 144.0 * glass.price_per_sq_ft).to_cents();
        assert_eq!(breakdown.amount(PriceComponent::Glazing), expected_glass);
        assert!(breakdown.priceable);
        assert_sums(&breakdown);
    }

    #[test]
    fn test_average_border_prices_asymmetry() {
        let plain = FrameConfiguration::new(11.0, 14.0, "black-classic");
        let weighted = FrameConfiguration {
            bottom_weighted: true,
            ..plain.clone()
        };
        let (geometry, breakdown) = quote(&weighted);
        let (w, h) = priced_size(&geometry);
        let real_perimeter = 2.0 * (geometry.mat_width_in() + geometry.mat_height_in());
        assert!((2.0 * (w + h) - real_perimeter).abs() < EPS);
        assert!(breakdown.amount(PriceComponent::Frame) > quote(&plain).1.amount(PriceComponent::Frame));
    }

    #[test]
    fn test_backing_only_glazing_included() {
        let config = FrameConfiguration {
            glazing_id: "none".to_string(),
            ..FrameConfiguration::default()
        };
        let (_, breakdown) = quote(&config);
        let line = breakdown.line(PriceComponent::Glazing).unwrap();
        assert_eq!(line.amount, Usd::ZERO);
        assert!(line.included);
    }

    #[test]
    fn test_double_mat_costs_more() {
        let single = FrameConfiguration::default();
        let double = FrameConfiguration {
            mat_type: MatType::Double,
            mat_inner_color_id: Some("black".to_string()),
            ..single.clone()
        };
        let single_mat = quote(&single).1.amount(PriceComponent::Mat);
        let double_mat = quote(&double).1.amount(PriceComponent::Mat);
        assert!(double_mat > single_mat);

        let none = FrameConfiguration {
            mat_type: MatType::None,
            ..single
        };
        assert_eq!(quote(&none).1.amount(PriceComponent::Mat), Usd::ZERO);
    }

    #[test]
    fn test_premium_mat_multiplier() {
        let regular = FrameConfiguration::default();
        let premium = FrameConfiguration {
            mat_color_id: Some("gold-foil".to_string()),
            ..regular.clone()
        };
        assert!(quote(&premium).1.amount(PriceComponent::Mat) > quote(&regular).1.amount(PriceComponent::Mat));
    }

    #[test]
    fn test_optional_fees() {
        let config = FrameConfiguration {
            service_type: ServiceType::PrintAndFrame,
            image_url: Some("https://cdn.example.com/a.jpg".to_string()),
            hardware: Hardware::Security,
            nameplate: Some(NameplateConfig {
                enabled: true,
                ..Default::default()
            }),
            ..FrameConfiguration::new(10.0, 10.0, "black-classic")
        };
        let (_, breakdown) = quote(&config);
        assert_eq!(breakdown.amount(PriceComponent::Print), Usd(12.0));
        assert_eq!(breakdown.amount(PriceComponent::Hardware), Usd(8.95));
        assert_eq!(breakdown.amount(PriceComponent::Nameplate), Usd(29.0));
        assert!(breakdown.line(PriceComponent::Oversize).is_none());
        assert_sums(&breakdown);
    }

    #[test]
    fn test_oversize_fee() {
        let config = FrameConfiguration::new(36.0, 30.0, "black-classic");
        let (geometry, breakdown) = quote(&config);
        assert!(geometry.frame_width_in > 40.0);
        assert_eq!(breakdown.amount(PriceComponent::Oversize), Usd(100.0));
    }

    #[test]
    fn test_diploma_add_ons() {
        let config = FrameConfiguration {
            layout: LayoutSpec::from_layout_id("diploma-tassel-photo", None).unwrap(),
            ..FrameConfiguration::new(11.0, 8.5, "black-shadowbox")
        };
        let (_, breakdown) = quote(&config);
        assert_eq!(breakdown.amount(PriceComponent::PhotoOpening), Usd(5.0));
        assert_eq!(breakdown.amount(PriceComponent::TasselHook), Usd(15.0));

        let no_mat = FrameConfiguration {
            mat_type: MatType::None,
            ..config
        };
        assert!(quote(&no_mat).1.line(PriceComponent::PhotoOpening).is_none());
    }

    #[test]
    fn test_record_base_price() {
        let config = FrameConfiguration {
            layout: LayoutSpec::from_layout_id("single-with-cover", None).unwrap(),
            ..FrameConfiguration::default()
        };
        let (_, breakdown) = quote(&config);
        assert_eq!(breakdown.amount(PriceComponent::Frame), Usd(249.0));
    }

    #[test]
    fn test_ticket_surcharges() {
        let config = FrameConfiguration {
            layout: LayoutSpec::from_layout_id("ticket-grid-4", None).unwrap(),
            mat_type: MatType::Double,
            mat_inner_color_id: Some("black".to_string()),
            ..FrameConfiguration::default()
        };
        let (_, breakdown) = quote(&config);
        assert_eq!(breakdown.amount(PriceComponent::ExtraOpenings), Usd(45.0));
        assert_eq!(breakdown.amount(PriceComponent::DoubleMat), Usd(15.0));
        let mat = breakdown.line(PriceComponent::Mat).unwrap();
        assert_eq!(mat.amount, Usd::ZERO);
        assert!(mat.included);
        assert_sums(&breakdown);

        // the same board with a single mat carries only the opening surcharge
        let single = FrameConfiguration {
            mat_type: MatType::Single,
            ..config
        };
        let (_, breakdown) = quote(&single);
        let surcharges = breakdown.amount(PriceComponent::Mat) + breakdown.amount(PriceComponent::ExtraOpenings);
        assert_eq!(surcharges, Usd(45.0));
        assert!(breakdown.line(PriceComponent::DoubleMat).is_none());
    }

    #[test]
    fn test_not_priceable_is_all_zero() {
        let breakdown = PricingBreakdown::not_priceable();
        assert!(!breakdown.priceable);
        assert_eq!(breakdown.total, Usd::ZERO);
        assert!(breakdown.lines.iter().all(|l| l.amount == Usd::ZERO));
        assert!(breakdown.line(PriceComponent::Glazing).is_some());
    }
}
