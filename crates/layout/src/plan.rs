use crate::LayoutError;
use crate::blocks::estimate_height;
use crate::scale::ScaleProfile;
use cardfit_types::{CardContent, Size};

/// A scale profile paired with the height its content needs.
///
/// Built before any canvas exists, so nothing downstream ever observes a
/// card whose height is still unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    profile: ScaleProfile,
    height: u32,
}

impl LayoutPlan {
    /// Fails when `profile`'s width is so small that every block floors to
    /// zero pixels and the card would have no height at all.
    pub fn new(profile: ScaleProfile, content: &CardContent) -> Result<Self, LayoutError> {
        let height = estimate_height(&profile, content);
        if height == 0 {
            return Err(LayoutError::configuration(
                "paper_size",
                format!("a {} px wide card has no room for content", profile.width),
            ));
        }
        log::debug!(
            "Planned card {}x{} (scale {:.4})",
            profile.width,
            height,
            profile.scale_factor
        );
        Ok(Self { profile, height })
    }

    pub fn profile(&self) -> &ScaleProfile {
        &self.profile
    }

    pub fn width(&self) -> u32 {
        self.profile.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_content;

    #[test]
    fn tiny_width_is_rejected_before_any_canvas() {
        let content = sample_content(5, 3);
        let err = LayoutPlan::new(ScaleProfile::derive(20).unwrap(), &content).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Configuration { ref field, .. } if field == "paper_size"
        ));
    }

    #[test]
    fn smallest_width_with_a_nonzero_term_plans_a_card() {
        let profile = ScaleProfile::derive(22).unwrap();
        let plan = LayoutPlan::new(profile, &sample_content(0, 0)).unwrap();
        assert!(plan.height() > 0);
        assert_eq!(plan.size(), Size::new(22, plan.height()));
    }
}
