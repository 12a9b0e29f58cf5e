// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub label: &'static str,
}

const fn entry(code: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry { code, label }
}

/// Ordered code -> label table backing one selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    name: &'static str,
    entries: &'static [CatalogEntry],
}

impl Catalog {
    pub const fn new(name: &'static str, entries: &'static [CatalogEntry]) -> Self {
        Self { name, entries }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn get(&self, code: &str) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            bail!("catalog {} has no entries", self.name);
        }
        let mut seen = HashSet::new();
        for entry in self.entries {
            if entry.code.trim().is_empty() {
                bail!("catalog {} has an entry with an empty code", self.name);
            }
            if !seen.insert(entry.code) {
                bail!("catalog {} repeats code {:?}", self.name, entry.code);
            }
        }
        Ok(())
    }
}

/// Display label for `code`, or `code` itself when the catalog does not know it.
pub fn resolve_label<'a>(catalog: &Catalog, code: &'a str) -> &'a str {
    match catalog.get(code) {
        Some(entry) => entry.label,
        None => code,
    }
}

const CORE_SUBJECT_ENTRIES: [CatalogEntry; 10] = [
    entry("matematik", "Matematik"),
    entry("svenska", "Svenska"),
    entry("engelska", "Engelska"),
    entry("no", "NO (Naturorienterande ämnen)"),
    entry("so", "SO (Samhällsorienterande ämnen)"),
    entry("idrott", "Idrott och hälsa"),
    entry("bild", "Bild"),
    entry("musik", "Musik"),
    entry("slojd", "Slöjd"),
    entry("hem", "Hem- och konsumentkunskap"),
];

const ASSESSMENT_SUBJECT_ENTRIES: [CatalogEntry; 12] = [
    entry("matematik", "Matematik"),
    entry("svenska", "Svenska"),
    entry("svenska-sva", "Svenska som andraspråk"),
    entry("engelska", "Engelska"),
    entry("no", "NO (Naturorienterande ämnen)"),
    entry("so", "SO (Samhällsorienterande ämnen)"),
    entry("idrott", "Idrott och hälsa"),
    entry("bild", "Bild"),
    entry("musik", "Musik"),
    entry("slojd", "Slöjd"),
    entry("hem", "Hem- och konsumentkunskap"),
    entry("moderna-sprak", "Moderna språk"),
];

const COMPULSORY_GRADE_ENTRIES: [CatalogEntry; 10] = [
    entry("1", "Årskurs 1"),
    entry("2", "Årskurs 2"),
    entry("3", "Årskurs 3"),
    entry("4", "Årskurs 4"),
    entry("5", "Årskurs 5"),
    entry("6", "Årskurs 6"),
    entry("7", "Årskurs 7"),
    entry("8", "Årskurs 8"),
    entry("9", "Årskurs 9"),
    entry("gymnasiet", "Gymnasiet"),
];

const ALL_GRADE_ENTRIES: [CatalogEntry; 11] = [
    entry("1", "Årskurs 1"),
    entry("2", "Årskurs 2"),
    entry("3", "Årskurs 3"),
    entry("4", "Årskurs 4"),
    entry("5", "Årskurs 5"),
    entry("6", "Årskurs 6"),
    entry("7", "Årskurs 7"),
    entry("8", "Årskurs 8"),
    entry("9", "Årskurs 9"),
    entry("gymnasiet", "Gymnasiet"),
    entry("vux", "Vuxenutbildning"),
];

pub const CORE_SUBJECTS: Catalog = Catalog::new("subjects", &CORE_SUBJECT_ENTRIES);
pub const ASSESSMENT_SUBJECTS: Catalog =
    Catalog::new("assessment subjects", &ASSESSMENT_SUBJECT_ENTRIES);
pub const COMPULSORY_GRADES: Catalog = Catalog::new("grades", &COMPULSORY_GRADE_ENTRIES);
/// Compulsory grades plus adult education.
pub const ALL_GRADES: Catalog = Catalog::new("grades incl. adult education", &ALL_GRADE_ENTRIES);
