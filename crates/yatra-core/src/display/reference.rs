//! Reference sheets built from the static content in
//! [`crate::models::reference`].

use std::fmt;

use crate::models::{
    reference::{
        find_faq, DARSHAN_BOOKING_URL, DARSHAN_FAQ, EMERGENCY_CONTACTS, GHAT_ROAD_HOURS,
        GHAT_ROAD_TIPS, HEALTH_TIPS, HOSPITALS,
    },
    DarshanFaq,
};

/// Emergency numbers, hospitals, ghat road timings and health tips.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencySheet;

impl fmt::Display for EmergencySheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Emergency information")?;
        writeln!(f)?;

        writeln!(f, "## Hospitals")?;
        writeln!(f)?;
        for hospital in HOSPITALS {
            writeln!(
                f,
                "- **{}**: {} ([map]({}))",
                hospital.name, hospital.phone, hospital.location_link
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Emergency contacts")?;
        writeln!(f)?;
        for contact in EMERGENCY_CONTACTS {
            writeln!(f, "- **{}**: {}", contact.service, contact.phone)?;
        }
        writeln!(f)?;

        writeln!(f, "## Ghat road")?;
        writeln!(f)?;
        writeln!(
            f,
            "Forest gates are open from {GHAT_ROAD_HOURS}. Vehicles are not allowed through at night."
        )?;
        writeln!(f)?;
        for tip in GHAT_ROAD_TIPS {
            writeln!(f, "- {tip}")?;
        }
        writeln!(f)?;

        writeln!(f, "## Health tips")?;
        writeln!(f)?;
        for tip in HEALTH_TIPS {
            writeln!(f, "- {tip}")?;
        }
        Ok(())
    }
}

/// Darshan FAQ entries, all of them or those matching a query.
#[derive(Debug, Clone)]
pub struct DarshanGuide(pub Vec<&'static DarshanFaq>);

impl DarshanGuide {
    pub fn all() -> Self {
        Self(DARSHAN_FAQ.iter().collect())
    }

    /// Entries matching `query`, or every entry when `query` is `None`.
    pub fn lookup(query: Option<&str>) -> Self {
        match query {
            Some(query) => Self(find_faq(query).into_iter().collect()),
            None => Self::all(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DarshanGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Darshan guide")?;
        writeln!(f)?;
        if self.0.is_empty() {
            writeln!(f, "No matching questions found.")?;
        }
        for faq in &self.0 {
            writeln!(f, "## {}", faq.question)?;
            writeln!(f)?;
            writeln!(f, "{}", faq.answer)?;
            writeln!(f)?;
        }
        writeln!(f, "Book darshan tickets online: {DARSHAN_BOOKING_URL}")
    }
}
