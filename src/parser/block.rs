//! Framing for dumps that are not one-row-per-line: marker-delimited blocks,
//! the fixed-size multiplier matrices and the version define.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::model::{MultiplierTable, SpellScalingTable};
use crate::parser::row::parse_f64;
use crate::schema::{
    COMBAT_RATING_ARRAY, MULTIPLIER_COLUMNS, MULTIPLIER_ROWS, SPELL_SCALING_COLUMNS,
    SPELL_SCALING_MARKER, SPELL_SCALING_ROWS, STAMINA_ARRAY, VERSION_DEFINE,
};

static COMBAT_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| matrix_pattern(COMBAT_RATING_ARRAY));
static STAMINA_RE: LazyLock<Regex> = LazyLock::new(|| matrix_pattern(STAMINA_ARRAY));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)[fF]?\s*(?:,|$)").expect("number pattern")
});

static GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("group pattern"));

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"{}\s+"([^"]*)""#, VERSION_DEFINE)).expect("version pattern")
});

/// `name[][N] = { {..}, {..}, {..}, {..}` across any number of lines
fn matrix_pattern(array: &str) -> Regex {
    let group = r"\{([^{}]*)\}\s*,?\s*";
    let pattern = format!(
        r"(?s){}\s*\[\s*\]\s*\[\s*\d+\s*\]\s*=\s*\{{\s*{}{}{}{}",
        regex::escape(array),
        group,
        group,
        group,
        group
    );
    Regex::new(&pattern).expect("matrix pattern")
}

/// Text between `marker` and the next `};`, or `None` when the marker is absent
pub fn slice_block<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find("};").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Numeric tokens of a comma separated group, at most `limit` of them
fn scan_numbers(group: &str, limit: usize) -> Vec<f64> {
    NUMBER_RE
        .captures_iter(group)
        .filter_map(|c| c.get(1).and_then(|m| parse_f64(m.as_str())))
        .take(limit)
        .collect()
}

fn decode_matrix(text: &str, re: &Regex, array: &str) -> MultiplierTable {
    let mut table = MultiplierTable::empty();
    let Some(captures) = re.captures(text) else {
        warn!("{} not found in scale data", array);
        return table;
    };

    for (row, slot) in table.rows.iter_mut().enumerate().take(MULTIPLIER_ROWS) {
        if let Some(group) = captures.get(row + 1) {
            for (column, value) in scan_numbers(group.as_str(), MULTIPLIER_COLUMNS)
                .into_iter()
                .enumerate()
            {
                slot[column] = value;
            }
        }
    }
    table
}

/// Four rows (armor, weapon, trinket, jewellery) of 1300 item-level multipliers
pub fn combat_rating_matrix(text: &str) -> MultiplierTable {
    decode_matrix(text, &COMBAT_RATING_RE, COMBAT_RATING_ARRAY)
}

pub fn stamina_matrix(text: &str) -> MultiplierTable {
    decode_matrix(text, &STAMINA_RE, STAMINA_ARRAY)
}

/// 21 scaling-class rows of 80 per-level budgets
pub fn spell_scaling_matrix(text: &str) -> SpellScalingTable {
    let mut table = SpellScalingTable::empty();
    let Some(block) = slice_block(text, SPELL_SCALING_MARKER) else {
        warn!("spell scaling block not found in scale data");
        return table;
    };

    for (row, group) in GROUP_RE
        .captures_iter(block)
        .filter_map(|c| c.get(1))
        .take(SPELL_SCALING_ROWS)
        .enumerate()
    {
        for (column, value) in scan_numbers(group.as_str(), SPELL_SCALING_COLUMNS)
            .into_iter()
            .enumerate()
        {
            table.rows[row][column] = value;
        }
    }
    table
}

/// Client build string from `#define CLIENT_DATA_WOW_VERSION "x.y.z.b"`
pub fn version_string(text: &str) -> String {
    match VERSION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().to_string(),
        None => {
            warn!("{} not found", VERSION_DEFINE);
            String::new()
        }
    }
}
