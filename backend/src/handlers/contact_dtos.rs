use serde::Deserialize;

use crate::utils::sanitize::clean;

/// Raw url-encoded form body. Absent fields read as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

/// A submission after tag stripping and trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl From<LeadForm> for Lead {
    fn from(form: LeadForm) -> Self {
        Self {
            name: clean(&form.name),
            email: clean(&form.email),
            company: clean(&form.company),
            message: clean(&form.message),
        }
    }
}

impl Lead {
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }

    pub fn subject(&self) -> String {
        format!("New SSD HOLDING Lead: {}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "New lead from SSD HOLDING landing page\n\n\
             Name: {}\n\
             Email: {}\n\
             Company: {}\n\n\
             Message:\n{}\n",
            self.name, self.email, self.company, self.message
        )
    }
}
