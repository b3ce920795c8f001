use log::warn;
use std::fmt;
use std::path::{ Path, PathBuf };

/// The roles a screenshot can play in a comparison, in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotRole {
    /// Rendering from the trusted reference renderer (EPUB.js)
    Reference,
    /// App rendering through the HTML (WebView) renderer
    CandidatePrimary,
    /// App rendering through the native renderer
    CandidateSecondary,
}

impl ScreenshotRole {
    pub const ALL: [ScreenshotRole; 3] = [
        ScreenshotRole::Reference,
        ScreenshotRole::CandidatePrimary,
        ScreenshotRole::CandidateSecondary,
    ];

    /// Label drawn above the panel in a composed comparison
    pub fn label(&self) -> &'static str {
        match self {
            ScreenshotRole::Reference => "Reference (EPUB.js)",
            ScreenshotRole::CandidatePrimary => "iOS HTML (WebView)",
            ScreenshotRole::CandidateSecondary => "iOS Native",
        }
    }
}

impl fmt::Display for ScreenshotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// File names for one book/chapter pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotNames {
    book: String,
    chapter: String,
}

impl ScreenshotNames {
    pub fn new(book: impl Into<String>, chapter: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter: chapter.into(),
        }
    }

    pub fn reference(&self) -> String {
        format!("ref_{}_ch{}.png", self.book, self.chapter)
    }

    pub fn html(&self) -> String {
        format!("ios_{}_ch{}_html.png", self.book, self.chapter)
    }

    /// Generic app screenshot, used when the `_html` variant is absent
    pub fn html_fallback(&self) -> String {
        format!("ios_{}_ch{}.png", self.book, self.chapter)
    }

    pub fn native(&self) -> String {
        format!("ios_{}_ch{}_native.png", self.book, self.chapter)
    }

    pub fn comparison(&self) -> String {
        format!("comparison_{}_ch{}.png", self.book, self.chapter)
    }
}

/// A screenshot that exists on disk for a given role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScreenshot {
    pub role: ScreenshotRole,
    pub path: PathBuf,
}

/// Role-labelled screenshots for one book/chapter, each optionally present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotSet {
    pub reference: Option<PathBuf>,
    pub candidate_primary: Option<PathBuf>,
    pub candidate_secondary: Option<PathBuf>,
}

impl ScreenshotSet {
    /// Resolve every role against `dir`. Missing roles are logged and left
    /// empty; nothing is decoded here.
    pub fn resolve(dir: &Path, names: &ScreenshotNames) -> Self {
        let reference = dir.join(names.reference());

        let mut html = dir.join(names.html());
        if !html.exists() {
            html = dir.join(names.html_fallback());
        }

        let native = dir.join(names.native());

        Self {
            reference: existing(ScreenshotRole::Reference, reference),
            candidate_primary: existing(ScreenshotRole::CandidatePrimary, html),
            candidate_secondary: existing(ScreenshotRole::CandidateSecondary, native),
        }
    }

    pub fn get(&self, role: ScreenshotRole) -> Option<&Path> {
        match role {
            ScreenshotRole::Reference => self.reference.as_deref(),
            ScreenshotRole::CandidatePrimary => self.candidate_primary.as_deref(),
            ScreenshotRole::CandidateSecondary => self.candidate_secondary.as_deref(),
        }
    }

    /// Present screenshots in resolution order
    pub fn resolved(&self) -> Vec<ResolvedScreenshot> {
        ScreenshotRole::ALL.iter()
            .filter_map(|role| {
                self.get(*role).map(|path| ResolvedScreenshot {
                    role: *role,
                    path: path.to_path_buf(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        ScreenshotRole::ALL.iter()
            .filter(|role| self.get(**role).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn existing(role: ScreenshotRole, path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        warn!("{} screenshot not found: {}", role, path.display());
        None
    }
}
