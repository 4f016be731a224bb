//! Page content and document layout
//!
//! The demo page is a stack of sections laid out top to bottom. Layout
//! wraps each section to the terminal width and records where it sits in
//! document rows, which is all the scroll effects need.

use textwrap::Options;

/// Widest the text column gets, regardless of terminal width
const MAX_COLUMN_WIDTH: u16 = 72;
/// Blank rows above the hero title
const HERO_PADDING: usize = 6;
/// Blank rows between sections
const SECTION_GAP: usize = 3;

/// Static section content
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub kicker: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    /// Fade preset name looked up in settings
    pub preset: &'static str,
    /// Hero sections get a parallax shift
    pub hero: bool,
}

pub const SECTIONS: &[Section] = &[
    Section {
        kicker: "NORTHLIGHT STUDIO",
        title: "We build calm software for loud markets",
        body: "Product strategy, interface design and engineering under one roof. \
               Scroll down to see what that looks like in practice.",
        preset: "hero",
        hero: true,
    },
    Section {
        kicker: "01 / ABOUT",
        title: "A small team with long attention spans",
        body: "Twelve people across design and engineering. We take on a handful of \
               projects a year and stay with them well past launch, because the \
               interesting problems show up in month six, not week one.",
        preset: "default",
        hero: false,
    },
    Section {
        kicker: "02 / SERVICES",
        title: "What we do",
        body: "Discovery workshops and product audits. Design systems that survive \
               contact with real teams. Web and native applications, performance \
               work, accessibility reviews and the boring infrastructure that keeps \
               all of it running at three in the morning.",
        preset: "default",
        hero: false,
    },
    Section {
        kicker: "03 / WORK",
        title: "Selected projects",
        body: "A booking platform for independent cinemas. A field-data app for \
               forestry crews working offline for weeks. A dashboard that replaced \
               forty spreadsheets at a regional freight company. A storefront that \
               loads in under a second on a train.",
        preset: "subtle",
        hero: false,
    },
    Section {
        kicker: "04 / PROCESS",
        title: "How a project runs",
        body: "Two weeks of listening before anything is drawn. Then short cycles: \
               a working slice every fortnight, reviewed with the people who will \
               use it. Decisions get written down. Nothing ships that we would not \
               want to maintain ourselves.",
        preset: "default",
        hero: false,
    },
    Section {
        kicker: "05 / TESTIMONIALS",
        title: "What clients say",
        body: "\"They asked better questions than our own board.\" \
               \"The first agency whose handover documents we actually read.\" \
               \"Our support tickets dropped by half within a quarter.\"",
        preset: "subtle",
        hero: false,
    },
    Section {
        kicker: "06 / CONTACT",
        title: "Start a conversation",
        body: "hello@northlight.studio. We reply within two working days, even \
               when the answer is no.",
        preset: "default",
        hero: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Kicker,
    Title,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub kind: LineKind,
    pub text: String,
}

impl PageLine {
    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            text: String::new(),
        }
    }
}

/// One section placed in the document
#[derive(Debug, Clone)]
pub struct SectionLayout {
    /// First document row of the section
    pub top: usize,
    pub lines: Vec<PageLine>,
}

impl SectionLayout {
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Whole page placed in the document
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub sections: Vec<SectionLayout>,
    pub total_height: usize,
    /// Text column width used for wrapping
    pub column_width: u16,
}

impl PageLayout {
    /// Wrap `sections` for a terminal `width` columns wide
    pub fn build(sections: &[Section], width: u16) -> Self {
        let column_width = width.saturating_sub(6).clamp(16, MAX_COLUMN_WIDTH);
        let options = Options::new(column_width as usize);

        let mut placed = Vec::with_capacity(sections.len());
        let mut row = 0usize;

        for section in sections {
            let mut lines = Vec::new();
            if section.hero {
                lines.extend(std::iter::repeat_with(PageLine::blank).take(HERO_PADDING));
            }
            lines.push(PageLine {
                kind: LineKind::Kicker,
                text: section.kicker.to_string(),
            });
            for text in textwrap::wrap(section.title, &options) {
                lines.push(PageLine {
                    kind: LineKind::Title,
                    text: text.into_owned(),
                });
            }
            lines.push(PageLine::blank());
            for text in textwrap::wrap(section.body, &options) {
                lines.push(PageLine {
                    kind: LineKind::Body,
                    text: text.into_owned(),
                });
            }

            let layout = SectionLayout { top: row, lines };
            row += layout.height() + SECTION_GAP;
            placed.push(layout);
        }

        Self {
            sections: placed,
            total_height: row,
            column_width,
        }
    }
}
