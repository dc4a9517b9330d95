//! Loan offers: loan products borrowers can apply for.

use super::{Attributes, DocumentId};

/// Number of offers featured on the landing page.
pub const HOME_OFFER_LIMIT: u32 = 6;

/// Submitted content of a new loan offer, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanOfferDraft {
    /// Landing-page visibility flag; absent until an administrator sets it.
    pub show_on_home: Option<bool>,
    /// Amount, terms, description, and any other submitted fields.
    pub attributes: Attributes,
}

/// A stored loan offer.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - Only `show_on_home` is mutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanOffer {
    id: DocumentId,
    show_on_home: Option<bool>,
    attributes: Attributes,
}

impl LoanOffer {
    /// Combine a store-assigned identifier with submitted content.
    #[must_use]
    pub fn new(id: DocumentId, draft: LoanOfferDraft) -> Self {
        let LoanOfferDraft {
            show_on_home,
            attributes,
        } = draft;
        Self {
            id,
            show_on_home,
            attributes,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Landing-page visibility flag.
    #[must_use]
    pub fn show_on_home(&self) -> Option<bool> {
        self.show_on_home
    }

    /// Free-form offer fields.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set the landing-page flag, reporting whether the value changed.
    pub fn set_show_on_home(&mut self, show_on_home: bool) -> bool {
        let changed = self.show_on_home != Some(show_on_home);
        self.show_on_home = Some(show_on_home);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, true, true)]
    #[case(Some(false), true, true)]
    #[case(Some(true), true, false)]
    fn set_show_on_home_reports_change(
        #[case] initial: Option<bool>,
        #[case] next: bool,
        #[case] changed: bool,
    ) {
        let mut offer = LoanOffer::new(
            DocumentId::from_bytes([7; 12]),
            LoanOfferDraft {
                show_on_home: initial,
                attributes: Attributes::default(),
            },
        );
        assert_eq!(offer.set_show_on_home(next), changed);
        assert_eq!(offer.show_on_home(), Some(next));
    }
}
