use crate::domain::model::{ApartmentType, PlanRecord};
use crate::domain::ports::{PlanRenderer, RenderContext};
use std::fmt::Write;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;

const FACADE_COLOR: &str = "#ff6b6b";
const FACADE_THICKNESS: u32 = 3;

/// 簡單的 SVG 平面示意圖：外框、標題、房間清單、朝街面標記與面積範圍
#[derive(Debug, Clone)]
pub struct SvgPlanRenderer {
    width: u32,
    height: u32,
}

impl SvgPlanRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SvgPlanRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn fill_color(apartment_type: ApartmentType) -> &'static str {
    match apartment_type {
        ApartmentType::OnePlusOne => "#e3f2fd",
        ApartmentType::TwoPlusOne => "#f3e5f5",
        ApartmentType::ThreePlusOne => "#e8f5e8",
        ApartmentType::FourPlusOne => "#fff3e0",
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl PlanRenderer for SvgPlanRenderer {
    fn render(&self, plan: &PlanRecord, context: &RenderContext) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = String::new();

        // write! 到 String 不會失敗
        let _ = write!(
            svg,
            r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">"#
        );
        let _ = write!(
            svg,
            r##"<rect x="0" y="0" width="{w}" height="{h}" fill="{}" stroke="#333" stroke-width="2"/>"##,
            fill_color(plan.apartment_type)
        );
        let _ = write!(
            svg,
            r##"<text x="{}" y="25" text-anchor="middle" font-size="14" font-weight="bold" fill="#333">{}</text>"##,
            w / 2,
            escape_xml(&plan.name)
        );

        let apartments = context
            .apartment_count
            .or(plan.total_apartments.map(u64::from));
        let subtitle = match apartments {
            Some(n) => format!("{} - {} Daire", plan.apartment_type, n),
            None => plan.apartment_type.to_string(),
        };
        let _ = write!(
            svg,
            r##"<text x="{}" y="45" text-anchor="middle" font-size="12" fill="#666">{}</text>"##,
            w / 2,
            escape_xml(&subtitle)
        );

        for (i, room) in plan.rooms.iter().enumerate() {
            let y = 70 + i * 20;
            let _ = write!(
                svg,
                r##"<text x="10" y="{y}" font-size="11" fill="#333">• {}</text>"##,
                escape_xml(room)
            );
        }

        // 左、右、上、下
        let t = FACADE_THICKNESS;
        let facades = [
            (0, 0, t, h),
            (w.saturating_sub(t), 0, t, h),
            (0, 0, w, t),
            (0, h.saturating_sub(t), w, t),
        ];
        for (x, y, fw, fh) in facades.iter().take(plan.street_facing_sides as usize) {
            let _ = write!(
                svg,
                r#"<rect class="facade" x="{x}" y="{y}" width="{fw}" height="{fh}" fill="{FACADE_COLOR}"/>"#
            );
        }

        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" text-anchor="end" font-size="10" fill="#666">{}-{}m²</text>"##,
            w.saturating_sub(10),
            h.saturating_sub(10),
            plan.min_usable_area,
            plan.max_usable_area
        );

        svg.push_str("</svg>");
        svg
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(sides: u8) -> PlanRecord {
        PlanRecord {
            id: "p".to_string(),
            apartment_type: ApartmentType::TwoPlusOne,
            street_facing_sides: sides,
            min_usable_area: 250.0,
            max_usable_area: 600.0,
            average_apartment_area: 90.0,
            name: "Köşe <2+1> & Balkon".to_string(),
            description: String::new(),
            features: vec![],
            rooms: vec!["Salon: 33 m²".to_string(), "Mutfak: 15 m²".to_string()],
            total_apartments: Some(4),
        }
    }

    #[test]
    fn test_one_facade_bar_per_side() {
        let renderer = SvgPlanRenderer::default();
        for sides in 1..=4u8 {
            let svg = renderer.render(&plan(sides), &RenderContext::default());
            assert_eq!(svg.matches(r#"class="facade""#).count(), sides as usize);
        }
    }

    #[test]
    fn test_escapes_markup_in_names() {
        let svg = SvgPlanRenderer::default().render(&plan(1), &RenderContext::default());
        assert!(svg.contains("Köşe &lt;2+1&gt; &amp; Balkon"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_subtitle_prefers_calculated_count() {
        let renderer = SvgPlanRenderer::new(800, 600);
        let authored = renderer.render(&plan(2), &RenderContext::default());
        assert!(authored.contains("2+1 - 4 Daire"));

        let calculated = renderer.render(
            &plan(2),
            &RenderContext {
                apartment_count: Some(5),
            },
        );
        assert!(calculated.contains("2+1 - 5 Daire"));
        assert!(calculated.contains("250-600m²"));
        assert!(calculated.contains("• Salon: 33 m²"));
    }
}
