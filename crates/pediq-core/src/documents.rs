//! Embedded protocol reference documents.
//!
//! Markdown sources live in `docs/` and are compiled into the binary; the
//! registry is read-only static data. Calculators never read these; they
//! exist for the reference views in the client.

use jiff::civil::Date;

/// One markdown reference document, addressable by id.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolDocument {
    pub id: &'static str,
    pub title: &'static str,
    pub revised: Date,
    pub markdown: &'static str,
}

static DOCUMENTS: &[ProtocolDocument] = &[
    ProtocolDocument {
        id: "anaphylaxis",
        title: "Anaphylaxis",
        revised: Date::constant(2025, 9, 12),
        markdown: include_str!("../docs/anaphylaxis.md"),
    },
    ProtocolDocument {
        id: "croup",
        title: "Croup (Laryngotracheobronchitis)",
        revised: Date::constant(2025, 6, 30),
        markdown: include_str!("../docs/croup.md"),
    },
    ProtocolDocument {
        id: "dehydration",
        title: "Dehydration and Oral Rehydration",
        revised: Date::constant(2025, 8, 21),
        markdown: include_str!("../docs/dehydration.md"),
    },
    ProtocolDocument {
        id: "dengue",
        title: "Dengue — Staged Management",
        revised: Date::constant(2025, 10, 3),
        markdown: include_str!("../docs/dengue.md"),
    },
    ProtocolDocument {
        id: "diabetic_ketoacidosis",
        title: "Diabetic Ketoacidosis",
        revised: Date::constant(2025, 7, 17),
        markdown: include_str!("../docs/diabetic_ketoacidosis.md"),
    },
    ProtocolDocument {
        id: "sepsis",
        title: "Sepsis and Septic Shock",
        revised: Date::constant(2025, 9, 28),
        markdown: include_str!("../docs/sepsis.md"),
    },
    ProtocolDocument {
        id: "tbi",
        title: "Traumatic Brain Injury",
        revised: Date::constant(2025, 5, 9),
        markdown: include_str!("../docs/tbi.md"),
    },
];

/// All registered documents, in display order.
pub fn all_documents() -> &'static [ProtocolDocument] {
    DOCUMENTS
}

/// Look up a document by id.
pub fn get_document(id: &str) -> Option<&'static ProtocolDocument> {
    DOCUMENTS.iter().find(|d| d.id == id)
}
