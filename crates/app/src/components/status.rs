use shared_types::ApplicationStatus;
use shared_ui::components::BadgeVariant;

/// Badge colour for an application status.
pub fn application_badge(status: ApplicationStatus) -> BadgeVariant {
    match status {
        ApplicationStatus::Submitted => BadgeVariant::Secondary,
        ApplicationStatus::UnderReview => BadgeVariant::Warning,
        ApplicationStatus::Selected => BadgeVariant::Success,
        ApplicationStatus::Rejected => BadgeVariant::Destructive,
    }
}

/// Badge colour for an alumni post's approval state.
pub fn approval_badge(approved: bool) -> BadgeVariant {
    if approved {
        BadgeVariant::Success
    } else {
        BadgeVariant::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ALL_APPLICATION_STATUSES;

    #[test]
    fn outcomes_stand_out_from_pending_states() {
        assert_eq!(application_badge(ApplicationStatus::Selected), BadgeVariant::Success);
        assert_eq!(application_badge(ApplicationStatus::Rejected), BadgeVariant::Destructive);
        let pending: Vec<_> = ALL_APPLICATION_STATUSES
            .iter()
            .filter(|s| s.is_active())
            .map(|s| application_badge(*s))
            .collect();
        assert!(!pending.contains(&BadgeVariant::Success));
    }
}
