//! Collection statistics.

use std::collections::BTreeMap;
use wallman_catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub total: usize,
    pub without_original: usize,
    /// Share of wallpapers without an original, rounded to whole percent.
    /// `0` for an empty collection.
    pub without_original_percent: u32,
    /// One entry per type, by name.
    pub types: Vec<TypeStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeStats {
    pub name: String,
    pub wallpapers: usize,
    /// Franchise names, sorted.
    pub franchises: Vec<String>,
}

pub fn stats(catalog: &Catalog) -> Stats {
    let total = catalog.wallpapers().len();
    let without_original = catalog.wallpapers().iter().filter(|w| !w.has_original()).count();

    let mut types: BTreeMap<&str, TypeStats> = catalog
        .types()
        .map(|t| (t.name.as_str(), TypeStats { name: t.name.clone(), wallpapers: 0, franchises: Vec::new() }))
        .collect();
    for franchise in catalog.franchises() {
        if let Some(entry) = catalog.type_of(franchise.id).and_then(|t| types.get_mut(t.name.as_str())) {
            entry.franchises.push(franchise.name.clone());
        }
    }
    for wallpaper in catalog.wallpapers() {
        if let Some(entry) = catalog.type_of(wallpaper.franchise).and_then(|t| types.get_mut(t.name.as_str())) {
            entry.wallpapers += 1;
        }
    }
    let types = types
        .into_values()
        .map(|mut t| {
            t.franchises.sort();
            t
        })
        .collect();

    Stats { total, without_original, without_original_percent: percent(without_original, total), types }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 100 + total / 2) / total) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wallman_catalog::{Root, StoredFile, Wallpaper};

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(3, 3, 100)]
    fn test_percent(#[case] part: usize, #[case] total: usize, #[case] expected: u32) {
        assert_eq!(percent(part, total), expected);
    }

    #[test]
    fn test_stats() {
        let mut catalog = Catalog::new();
        let action = catalog.get_or_create_type("Action").unwrap();
        let puzzle = catalog.get_or_create_type("Puzzle").unwrap();
        let zelda = catalog.get_or_create_franchise("Zelda", action).unwrap();
        let metroid = catalog.get_or_create_franchise("Metroid", action).unwrap();
        catalog.get_or_create_franchise("Tetris", puzzle).unwrap();
        for (franchise, name, original) in [
            (zelda, "Zelda#1.png", Some("Zelda#o1.png")),
            (zelda, "Zelda#2.png", None),
            (metroid, "Metroid#1.png", Some("Metroid#o1.png")),
        ] {
            let file = StoredFile::new(Root::Wallpapers, format!("Action/{name}"));
            let original = original.map(|o| StoredFile::new(Root::Originals, format!("Action/{o}")));
            catalog.add_wallpaper(Wallpaper::new(file, original, franchise, 1)).unwrap();
        }

        let stats = stats(&catalog);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.without_original, 1);
        assert_eq!(stats.without_original_percent, 33);
        assert_eq!(
            stats.types,
            vec![
                TypeStats {
                    name: "Action".into(),
                    wallpapers: 3,
                    franchises: vec!["Metroid".into(), "Zelda".into()],
                },
                TypeStats { name: "Puzzle".into(), wallpapers: 0, franchises: vec!["Tetris".into()] },
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(stats(&Catalog::new()), Stats::default());
    }
}
