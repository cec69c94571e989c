//! Keyword catalog management for query correction and suggestion.
//!
//! A [`KeywordCatalog`] is the universe of valid search keywords. It is built
//! once, shared read-only (usually behind an `Arc`) and scanned in insertion
//! order, so that order decides ties between equally good corrections and the
//! order of related-keyword suggestions.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeaheadError};
use crate::spelling::levenshtein::char_len;

/// Prefix marking a literal keyword in the text format.
const ESCAPE: char = '\\';

/// Product category a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 식품
    Food,
    /// 전자제품
    Electronics,
    /// 패션
    Fashion,
    /// 생활용품
    Daily,
    /// 가구
    Furniture,
    /// 상품권
    Ticket,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Electronics,
        Category::Fashion,
        Category::Daily,
        Category::Furniture,
        Category::Ticket,
    ];

    /// Stable lowercase key as stored by the product backend.
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::Daily => "daily",
            Category::Furniture => "furniture",
            Category::Ticket => "ticket",
        }
    }

    /// Korean name shown in the storefront.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Food => "식품",
            Category::Electronics => "전자제품",
            Category::Fashion => "패션",
            Category::Daily => "생활용품",
            Category::Furniture => "가구",
            Category::Ticket => "상품권",
        }
    }

    /// Look up a category by its key or its Korean name.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|category| {
            category.key().eq_ignore_ascii_case(key) || category.display_name() == key
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = TypeaheadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s)
            .ok_or_else(|| TypeaheadError::invalid_argument(format!("unknown category '{s}'")))
    }
}

/// A single catalog keyword with its optional category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The keyword text.
    pub keyword: String,
    /// Category the keyword was filed under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl CatalogEntry {
    /// Create an uncategorized entry.
    pub fn new<S: Into<String>>(keyword: S) -> Self {
        CatalogEntry {
            keyword: keyword.into(),
            category: None,
        }
    }

    /// Create an entry filed under a category.
    pub fn with_category<S: Into<String>>(keyword: S, category: Category) -> Self {
        CatalogEntry {
            keyword: keyword.into(),
            category: Some(category),
        }
    }
}

/// An ordered, immutable collection of valid search keywords.
///
/// Duplicates are kept as given. Blank keywords are dropped on construction,
/// since an empty keyword is a substring of every query.
#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    entries: Vec<CatalogEntry>,
    lookup: AHashSet<String>,
}

impl KeywordCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, keeping their order.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let entries: Vec<CatalogEntry> = entries
            .into_iter()
            .filter_map(|entry| {
                let keyword = entry.keyword.trim();
                if keyword.is_empty() {
                    None
                } else {
                    Some(CatalogEntry {
                        keyword: keyword.to_string(),
                        category: entry.category,
                    })
                }
            })
            .collect();
        let lookup = entries.iter().map(|entry| entry.keyword.clone()).collect();

        KeywordCatalog { entries, lookup }
    }

    /// Build an uncategorized catalog from plain keywords.
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(keywords.into_iter().map(CatalogEntry::new).collect())
    }

    /// Derive keywords from product names.
    ///
    /// Each name is split into words after brackets, parentheses and any
    /// character other than Hangul syllables, ASCII letters, ASCII digits and
    /// whitespace are blanked out. Words shorter than two characters are
    /// dropped; the rest are kept once, in first-seen order.
    pub fn from_product_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = AHashSet::new();
        let mut keywords = Vec::new();

        for name in names {
            for word in extract_keywords(name.as_ref()) {
                if seen.insert(word.clone()) {
                    keywords.push(word);
                }
            }
        }

        debug!("derived {} keywords from product names", keywords.len());
        Self::from_keywords(keywords)
    }

    /// Load a catalog from a text file.
    ///
    /// One keyword per line. Blank lines and lines starting with `#` are
    /// skipped. A `[category]` line files the following keywords under that
    /// category until the next section header, and an empty `[]` header goes
    /// back to uncategorized keywords. A leading `\` marks a keyword that
    /// would otherwise read as a comment or a header; it is stripped on load.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut entries = Vec::new();
        let mut section = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(keyword) = line.strip_prefix(ESCAPE) {
                entries.push(CatalogEntry {
                    keyword: keyword.to_string(),
                    category: section,
                });
                continue;
            }

            if let Some(key) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                section = if key.is_empty() {
                    None
                } else {
                    Some(Category::from_key(key).ok_or_else(|| {
                        TypeaheadError::catalog(format!(
                            "unknown category [{key}] on line {}",
                            line_num + 1
                        ))
                    })?)
                };
                continue;
            }

            entries.push(CatalogEntry {
                keyword: line.to_string(),
                category: section,
            });
        }

        debug!("loaded {} keywords from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    /// Load a catalog from a JSON array of `{"keyword", "category"}` objects.
    pub fn load_from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;

        debug!("loaded {} keywords from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    /// Save the catalog in the text format read by [`KeywordCatalog::load_from_file`].
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the catalog in its text format.
    ///
    /// Entries are written in catalog order, with a section header wherever
    /// the category changes, so reloading keeps both order and categories.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut section = None;

        for entry in &self.entries {
            if entry.category != section {
                match entry.category {
                    Some(category) => writeln!(writer, "[{category}]")?,
                    None => writeln!(writer, "[]")?,
                }
                section = entry.category;
            }

            if entry.keyword.starts_with(['#', '[', ESCAPE]) {
                writeln!(writer, "{ESCAPE}{}", entry.keyword)?;
            } else {
                writeln!(writer, "{}", entry.keyword)?;
            }
        }

        Ok(())
    }

    /// Iterate over keywords in catalog order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.keyword.as_str())
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no keywords.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a keyword is in the catalog (exact match).
    pub fn contains(&self, keyword: &str) -> bool {
        self.lookup.contains(keyword)
    }

    /// Keywords filed under a category, in catalog order.
    pub fn in_category(&self, category: Category) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.category == Some(category))
            .map(|entry| entry.keyword.as_str())
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for category in self.entries.iter().filter_map(|entry| entry.category) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

/// Split a product name into candidate keywords.
pub fn extract_keywords(name: &str) -> Vec<String> {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '가'..='힣' => c,
            c if c.is_ascii_alphanumeric() || c.is_whitespace() => c,
            _ => ' ',
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| char_len(word) >= 2)
        .map(str::to_string)
        .collect()
}

/// Compiled-in keyword lists.
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    const ELECTRONICS: &'static [&'static str] = &[
        "모니터",
        "게이밍 모니터",
        "삼성 모니터",
        "LG 모니터",
        "4K 모니터",
        "노트북",
        "게이밍 노트북",
        "삼성전자 노트북",
        "LG 그램",
        "맥북",
        "이어폰",
        "무선 이어폰",
        "블루투스 이어폰",
        "노이즈캔슬링 이어폰",
        "에어팟",
        "갤럭시 버즈",
        "냉장고",
        "양문형 냉장고",
        "김치냉장고",
        "세탁기",
        "드럼세탁기",
        "건조기",
        "의류건조기",
        "청소기",
        "무선 청소기",
        "로봇청소기",
    ];

    const FASHION: &'static [&'static str] = &[
        "신발",
        "운동화",
        "나이키 운동화",
        "아디다스 운동화",
        "슬리퍼",
        "러닝화",
        "티셔츠",
        "반팔 티셔츠",
        "맨투맨",
        "후드티",
    ];

    const FOOD: &'static [&'static str] = &[
        "생수",
        "삼다수",
        "백산수",
        "라면",
        "신라면",
        "진라면",
        "컵라면",
        "커피",
        "맥심",
        "카누",
        "캡슐커피",
        "휴지",
        "롤화장지",
        "물티슈",
    ];

    /// The storefront's search keywords: electronics, fashion, then food.
    pub fn storefront() -> KeywordCatalog {
        let groups = [
            (Category::Electronics, Self::ELECTRONICS),
            (Category::Fashion, Self::FASHION),
            (Category::Food, Self::FOOD),
        ];

        let entries = groups
            .into_iter()
            .flat_map(|(category, keywords)| {
                keywords
                    .iter()
                    .map(move |keyword| CatalogEntry::with_category(*keyword, category))
            })
            .collect();

        KeywordCatalog::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::corrector::QueryCorrector;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    #[test]
    fn test_catalog_basic_operations() {
        let catalog = KeywordCatalog::from_keywords(["모니터", "노트북", "모니터"]);

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert!(catalog.contains("모니터"));
        assert!(!catalog.contains("모니"));
        assert_eq!(
            catalog.keywords().collect::<Vec<_>>(),
            vec!["모니터", "노트북", "모니터"]
        );
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let catalog = KeywordCatalog::from_keywords(["", "  ", " 커피 ", "라면"]);

        assert_eq!(catalog.keywords().collect::<Vec<_>>(), vec!["커피", "라면"]);
        assert!(catalog.contains("커피"));
    }

    #[test]
    fn test_storefront_catalog() {
        let catalog = BuiltinCatalog::storefront();

        assert_eq!(catalog.len(), 50);
        assert_eq!(catalog.keywords().next(), Some("모니터"));
        assert_eq!(catalog.keywords().last(), Some("물티슈"));
        assert_eq!(
            catalog.categories(),
            vec![Category::Electronics, Category::Fashion, Category::Food]
        );
        assert_eq!(catalog.in_category(Category::Electronics).len(), 26);
        assert_eq!(catalog.in_category(Category::Fashion).len(), 10);
        assert_eq!(catalog.in_category(Category::Food).len(), 14);
        assert!(catalog.in_category(Category::Furniture).is_empty());
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(Category::from_key("food"), Some(Category::Food));
        assert_eq!(Category::from_key("Electronics"), Some(Category::Electronics));
        assert_eq!(Category::from_key("패션"), Some(Category::Fashion));
        assert_eq!(Category::from_key("toys"), None);
        assert_eq!(Category::Daily.display_name(), "생활용품");
        assert_eq!(Category::Ticket.to_string(), "ticket");
        assert!("furniture".parse::<Category>().is_ok());
        assert!("garden".parse::<Category>().is_err());
    }

    #[test]
    fn test_extract_keywords() {
        assert_eq!(
            extract_keywords("[삼성전자] 갤럭시 북3 (15.6인치) 노트북!"),
            vec!["삼성전자", "갤럭시", "북3", "15", "6인치", "노트북"]
        );
        assert_eq!(extract_keywords("LG 그램 a"), vec!["LG", "그램"]);
        assert!(extract_keywords("★ - 1").is_empty());
    }

    #[test]
    fn test_from_product_names() {
        let catalog = KeywordCatalog::from_product_names([
            "[농심] 신라면 120g",
            "농심 신라면 컵",
            "(오뚜기) 진라면 매운맛",
        ]);

        assert_eq!(
            catalog.keywords().collect::<Vec<_>>(),
            vec!["농심", "신라면", "120g", "오뚜기", "진라면", "매운맛"]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "# storefront keywords").unwrap();
        writeln!(temp_file, "기프트카드").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "[electronics]").unwrap();
        writeln!(temp_file, "모니터").unwrap();
        writeln!(temp_file, "  게이밍 모니터  ").unwrap();
        writeln!(temp_file, "[식품]").unwrap();
        writeln!(temp_file, "라면").unwrap();
        temp_file.flush().unwrap();

        let catalog = KeywordCatalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(
            catalog.entries(),
            &[
                CatalogEntry::new("기프트카드"),
                CatalogEntry::with_category("모니터", Category::Electronics),
                CatalogEntry::with_category("게이밍 모니터", Category::Electronics),
                CatalogEntry::with_category("라면", Category::Food),
            ]
        );
    }

    #[test]
    fn test_load_from_file_unknown_section() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "모니터").unwrap();
        writeln!(temp_file, "[toys]").unwrap();
        temp_file.flush().unwrap();

        let error = KeywordCatalog::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(error, TypeaheadError::Catalog(_)));
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn test_file_round_trip() {
        let catalog = BuiltinCatalog::storefront();

        let temp_file = NamedTempFile::new().unwrap();
        catalog.save_to_file(temp_file.path()).unwrap();

        let loaded = KeywordCatalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.entries(), catalog.entries());
    }

    #[test]
    fn test_file_round_trip_keeps_interleaved_order() {
        let catalog = KeywordCatalog::from_entries(vec![
            CatalogEntry::with_category("abcd", Category::Food),
            CatalogEntry::new("abce"),
            CatalogEntry::with_category("모니터", Category::Electronics),
            CatalogEntry::new("기프트카드"),
            CatalogEntry::with_category("라면", Category::Food),
        ]);

        let mut text = Vec::new();
        catalog.write_to(&mut text).unwrap();
        assert_eq!(
            String::from_utf8(text).unwrap(),
            "[food]\nabcd\n[]\nabce\n[electronics]\n모니터\n[]\n기프트카드\n[food]\n라면\n"
        );

        let temp_file = NamedTempFile::new().unwrap();
        catalog.save_to_file(temp_file.path()).unwrap();
        let loaded = KeywordCatalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.entries(), catalog.entries());

        // Equal distances resolve to the first keyword in catalog order
        let before = QueryCorrector::new(Arc::new(catalog));
        let after = QueryCorrector::new(Arc::new(loaded));
        assert_eq!(before.correct_query("abcf").as_deref(), Some("abcd"));
        assert_eq!(after.correct_query("abcf").as_deref(), Some("abcd"));
    }

    #[test]
    fn test_file_round_trip_escapes_reserved_lines() {
        let catalog =
            KeywordCatalog::from_keywords(["#1 특가", "[food]", "[세일]", "\\백슬래시", "라면"]);

        let mut text = Vec::new();
        catalog.write_to(&mut text).unwrap();
        assert_eq!(
            String::from_utf8(text).unwrap(),
            "\\#1 특가\n\\[food]\n\\[세일]\n\\\\백슬래시\n라면\n"
        );

        let temp_file = NamedTempFile::new().unwrap();
        catalog.save_to_file(temp_file.path()).unwrap();
        let loaded = KeywordCatalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.entries(), catalog.entries());
        assert!(loaded.entries().iter().all(|entry| entry.category.is_none()));
    }

    #[test]
    fn test_load_from_file_empty_section() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[food]").unwrap();
        writeln!(temp_file, "라면").unwrap();
        writeln!(temp_file, "[]").unwrap();
        writeln!(temp_file, "기프트카드").unwrap();
        temp_file.flush().unwrap();

        let catalog = KeywordCatalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(
            catalog.entries(),
            &[
                CatalogEntry::with_category("라면", Category::Food),
                CatalogEntry::new("기프트카드"),
            ]
        );
    }

    #[test]
    fn test_load_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"[{{"keyword": "커피", "category": "food"}}, {{"keyword": "상품권"}}]"#
        )
        .unwrap();
        temp_file.flush().unwrap();

        let catalog = KeywordCatalog::load_from_json_file(temp_file.path()).unwrap();
        assert_eq!(
            catalog.entries(),
            &[
                CatalogEntry::with_category("커피", Category::Food),
                CatalogEntry::new("상품권"),
            ]
        );
    }
}
