//! Item references as they appear in an addon profile export.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One equipped (or bagged) item of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub slot: Option<String>,
    pub item_id: u32,
    pub enchant_id: u32,
    pub bonus_ids: Vec<u32>,
    pub gem_ids: Vec<u32>,
    pub equipped: bool,
}

impl ItemRef {
    pub fn new(item_id: u32) -> Self {
        Self {
            item_id,
            equipped: true,
            ..Default::default()
        }
    }

    /// Parse an item line such as
    /// `trinket1=,id=178769,bonus_id=6536/1498,gem_id=173128,enchant_id=6166`.
    /// Lines commented out with `#` describe bag items and are not equipped.
    pub fn parse_simc_line(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let (equipped, body) = match trimmed.strip_prefix('#') {
            Some(rest) => (false, rest.trim_start()),
            None => (true, trimmed),
        };

        let mut item = ItemRef {
            equipped,
            ..Default::default()
        };
        let mut has_id = false;

        for (position, token) in body.split(',').enumerate() {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| Error::InvalidItemLine(line.to_string()))?;
            match key {
                "id" => {
                    item.item_id = parse_id(value, line)?;
                    has_id = true;
                }
                "enchant_id" => item.enchant_id = parse_id(value, line)?,
                "bonus_id" => item.bonus_ids = parse_id_list(value, line)?,
                "gem_id" => item.gem_ids = parse_id_list(value, line)?,
                slot if position == 0 => item.slot = Some(slot.to_string()),
                // context, drop_level, crafted_stats and friends
                _ => {}
            }
        }

        if !has_id {
            return Err(Error::InvalidItemLine(line.to_string()));
        }
        Ok(item)
    }
}

fn parse_id(value: &str, line: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidItemLine(line.to_string()))
}

fn parse_id_list(value: &str, line: &str) -> Result<Vec<u32>> {
    value
        .split('/')
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_id(v, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipped_line() {
        let item = ItemRef::parse_simc_line(
            "trinket1=,id=178769,bonus_id=6536/1498/6646,gem_id=173128,enchant_id=6166",
        )
        .unwrap();
        assert_eq!(item.slot.as_deref(), Some("trinket1"));
        assert_eq!(item.item_id, 178769);
        assert_eq!(item.bonus_ids, vec![6536, 1498, 6646]);
        assert_eq!(item.gem_ids, vec![173128]);
        assert_eq!(item.enchant_id, 6166);
        assert!(item.equipped);
    }

    #[test]
    fn test_bag_line() {
        let item = ItemRef::parse_simc_line("# finger1=,id=178933,context=35").unwrap();
        assert!(!item.equipped);
        assert_eq!(item.item_id, 178933);
        assert!(item.bonus_ids.is_empty());
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(
            ItemRef::parse_simc_line("head=,bonus_id=1"),
            Err(Error::InvalidItemLine(_))
        ));
        assert!(matches!(
            ItemRef::parse_simc_line("head=,id=abc"),
            Err(Error::InvalidItemLine(_))
        ));
        assert!(ItemRef::parse_simc_line("head,id=1").is_err());
    }
}
