use crate::schema::FileType;
use anyhow::{bail, Result};
use tracing::info;

/// Resolves which file types to process based on include/exclude filters
pub fn resolve_file_types(
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> Result<Vec<FileType>> {
    match (include, exclude) {
        (Some(_), Some(_)) => {
            bail!("Cannot use both --include and --exclude at the same time");
        }
        (Some(include_list), None) => {
            let file_types = parse_names(&include_list)?;
            info!("including {} file types: {:?}", file_types.len(), include_list);
            Ok(file_types)
        }
        (None, Some(exclude_list)) => {
            let excluded = parse_names(&exclude_list)?;
            let file_types: Vec<FileType> = FileType::ALL
                .iter()
                .copied()
                .filter(|t| !excluded.contains(t))
                .collect();
            info!("including {} file types after exclusions", file_types.len());
            Ok(file_types)
        }
        (None, None) => Ok(FileType::ALL.to_vec()),
    }
}

fn parse_names(names: &[String]) -> Result<Vec<FileType>> {
    let mut file_types = Vec::with_capacity(names.len());
    for name in names {
        let file_type: FileType = name.trim().parse()?;
        if !file_types.contains(&file_type) {
            file_types.push(file_type);
        }
    }
    Ok(file_types)
}
