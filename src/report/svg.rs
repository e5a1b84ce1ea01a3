//! GEM result figure: one box per modulator with its targets binned by modulation category.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{GemError, Result};
use crate::model::category::ModulationCategory;
use crate::model::triplet::Triplet;

const GROUPS_PER_ROW: usize = 5;
const GROUP_WIDTH: i64 = 120;
const LEFT_MARGIN: i64 = 50;
const FIRST_ROW_START: i64 = 60;
const LINE_HEIGHT: i64 = 10;
const FONT: &str = "Verdana";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Modulator,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotGroup {
    pub name: String,
    pub members: BTreeMap<ModulationCategory, BTreeSet<String>>,
}

impl PlotGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.members.values().map(BTreeSet::len).sum()
    }

    pub fn height(&self, category: ModulationCategory) -> i64 {
        self.members.get(&category).map_or(0, |m| m.len() as i64)
    }

    /// Tallest activation column.
    fn top(&self) -> i64 {
        column_order()
            .iter()
            .filter(|c| c.is_activation())
            .map(|c| self.height(*c))
            .max()
            .unwrap_or(0)
    }

    /// Tallest inhibition column.
    fn bottom(&self) -> i64 {
        column_order()
            .iter()
            .filter(|c| !c.is_activation())
            .map(|c| self.height(*c))
            .max()
            .unwrap_or(0)
    }
}

/// Drawing model: the shared factor and its groups, largest first.
#[derive(Debug, Clone)]
pub struct PlotModel {
    pub factor: String,
    pub groups: Vec<PlotGroup>,
}

fn column_order() -> &'static [ModulationCategory] {
    &[
        ModulationCategory::EnhancesActivation,
        ModulationCategory::AttenuatesActivation,
        ModulationCategory::InvertsActivation,
        ModulationCategory::EnhancesInhibition,
        ModulationCategory::AttenuatesInhibition,
        ModulationCategory::InvertsInhibition,
    ]
}

fn category_color(category: ModulationCategory) -> (u8, u8, u8) {
    match category {
        ModulationCategory::EnhancesActivation => (33, 137, 33),
        ModulationCategory::AttenuatesActivation => (144, 238, 144),
        ModulationCategory::InvertsActivation => (253, 48, 48),
        ModulationCategory::EnhancesInhibition => (106, 33, 137),
        ModulationCategory::AttenuatesInhibition => (210, 143, 238),
        ModulationCategory::InvertsInhibition => (253, 207, 47),
    }
}

/// Horizontal slot (1 enhances, 2 attenuates, 3 inverts) and whether the box sits above the
/// factor line.
fn category_slot(category: ModulationCategory) -> (i64, bool) {
    let h = match category {
        ModulationCategory::EnhancesActivation | ModulationCategory::EnhancesInhibition => 1,
        ModulationCategory::AttenuatesActivation | ModulationCategory::AttenuatesInhibition => 2,
        ModulationCategory::InvertsActivation | ModulationCategory::InvertsInhibition => 3,
    };
    (h, category.is_activation())
}

pub fn build_plot_model(triplets: &[Triplet], group_by: GroupBy) -> Result<PlotModel> {
    let mut factors: BTreeSet<&str> = triplets.iter().map(|t| t.factor.as_str()).collect();
    if factors.len() > 1 {
        return Err(GemError::InvalidInput(format!(
            "plot needs triplets of a single factor, found {}",
            factors.iter().copied().collect::<Vec<_>>().join(", ")
        )));
    }
    let factor = factors.pop_first().unwrap_or_default().to_string();

    let mut groups: BTreeMap<String, PlotGroup> = BTreeMap::new();
    for triplet in triplets {
        let (key, member) = match group_by {
            GroupBy::Modulator => (&triplet.modulator, &triplet.target),
            GroupBy::Target => (&triplet.target, &triplet.modulator),
        };
        let group = groups
            .entry(key.clone())
            .or_insert_with(|| PlotGroup::new(key));
        let Some(category) = triplet.category else {
            continue;
        };
        group
            .members
            .entry(category)
            .or_default()
            .insert(member.clone());
    }

    let mut groups: Vec<PlotGroup> = groups.into_values().collect();
    groups.sort_by(|a, b| b.size().cmp(&a.size()).then_with(|| a.name.cmp(&b.name)));

    Ok(PlotModel { factor, groups })
}

pub fn render_gem_plot(triplets: &[Triplet], group_by: GroupBy) -> Result<String> {
    let model = build_plot_model(triplets, group_by)?;
    Ok(render_plot_model(&model))
}

pub fn write_gem_plot(path: &Path, triplets: &[Triplet], group_by: GroupBy) -> Result<()> {
    let svg = render_gem_plot(triplets, group_by)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    Ok(())
}

pub fn render_plot_model(model: &PlotModel) -> String {
    let mut body = String::new();
    let mut row_start = FIRST_ROW_START;

    for row in model.groups.chunks(GROUPS_PER_ROW) {
        let top = row.iter().map(PlotGroup::top).max().unwrap_or(0);
        let bottom = row.iter().map(PlotGroup::bottom).max().unwrap_or(0);
        let row_center = row_start + LINE_HEIGHT * top + 6;
        let row_bottom = row_center + LINE_HEIGHT * bottom + 42;

        draw_factor_line(&mut body, &model.factor, row_center);
        for (col, group) in row.iter().enumerate() {
            let x = LEFT_MARGIN + GROUP_WIDTH * col as i64;
            draw_group(&mut body, group, x, row_start, row_center, row_bottom);
        }
        row_start = row_bottom;
    }

    let n_cols = model.groups.len().clamp(1, GROUPS_PER_ROW) as i64;
    let width = LEFT_MARGIN + GROUP_WIDTH * n_cols + 40;
    let height = row_start + LINE_HEIGHT;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    ));
    out.push_str(&body);
    out.push_str("</svg>\n");
    out
}

fn draw_factor_line(out: &mut String, factor: &str, row_center: i64) {
    push_text(out, 10, row_center + 5, 12, "start", factor);
    push_text(out, 10, row_center - 7, 6, "start", "activates");
    push_text(out, 10, row_center + 12, 6, "start", "inhibits");
}

fn draw_group(
    out: &mut String,
    group: &PlotGroup,
    x: i64,
    row_start: i64,
    row_center: i64,
    row_bottom: i64,
) {
    out.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"110\" height=\"{}\" fill=\"none\" stroke=\"rgb(192,192,192)\"/>\n",
        x + 27,
        row_start - 25,
        row_bottom - row_start - 10
    ));
    push_text(out, x + 27 + GROUP_WIDTH / 2, row_start - 10, 12, "middle", &group.name);
    push_text(out, x + 33, row_start, 6, "start", "Enhances");
    push_text(out, x + 67, row_start, 6, "start", "Attenuates");
    push_text(out, x + 107, row_start, 6, "start", "Inverts");

    for &category in column_order() {
        let Some(members) = group.members.get(&category) else {
            continue;
        };
        let height = group.height(category) * LINE_HEIGHT;
        let (h, above) = category_slot(category);
        let bx = x + h * 34;
        let by = if above {
            row_center - (height + 4) + 2
        } else {
            row_center + 2
        };
        let (r, g, b) = category_color(category);
        out.push_str(&format!(
            "<rect x=\"{bx}\" y=\"{by}\" width=\"32\" height=\"{height}\" fill=\"rgb({r},{g},{b})\" fill-opacity=\"0.5\"/>\n"
        ));
        for (i, member) in members.iter().enumerate() {
            let ty = by - 2 + (i as i64 + 1) * LINE_HEIGHT;
            push_text(out, bx + 2, ty, 8, "start", member);
        }
    }
}

fn push_text(out: &mut String, x: i64, y: i64, size: u32, anchor: &str, text: &str) {
    out.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-family=\"{FONT}\" font-size=\"{size}\" text-anchor=\"{anchor}\" fill=\"black\">{}</text>\n",
        escape_xml(text)
    ));
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/svg.rs"]
mod tests;
