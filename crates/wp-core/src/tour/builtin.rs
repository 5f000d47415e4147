//! Tours shipped with the application.

use super::{CatalogError, ShowcaseKind, StepPosition, StepSpec, TourDefinition, TourId};

fn target(name: &str) -> String {
    format!("[data-tour=\"{name}\"]")
}

pub(super) fn builtin_definitions() -> Result<Vec<TourDefinition>, CatalogError> {
    Ok(vec![
        welcome()?,
        dashboard()?,
        campaign()?,
        leads()?,
        templates()?,
        accounts()?,
        autopilot()?,
    ])
}

fn welcome() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Welcome,
        "Welcome tour",
        "/dashboard",
        vec![
            StepSpec::new(
                target("sidebar"),
                "Your command center",
                "Everything lives in the sidebar: campaigns, leads, templates and sending accounts.",
            )
            .position(StepPosition::Right)
            .highlight(["campaigns", "leads"]),
            StepSpec::new(
                target("new-campaign-button"),
                "Launch your first campaign",
                "Start here to build a sequence and pick who receives it.",
            )
            .media("welcome/new-campaign.webp")
            .pro_tip("Campaigns can be paused at any time without losing progress."),
            StepSpec::new(
                target("stats-overview"),
                "Track what matters",
                "Opens, replies and bounces update in real time as your emails go out.",
            )
            .showcase(ShowcaseKind::Metrics)
            .highlight(["replies"]),
            StepSpec::new(
                target("help-menu"),
                "Replay any tour",
                "Open the help menu whenever you want a refresher on a screen.",
            )
            .position(StepPosition::Left)
            .keyboard_hint("Press → to continue, Esc to close"),
        ],
    )
}

fn dashboard() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Dashboard,
        "Dashboard tour",
        "/dashboard",
        vec![
            StepSpec::new(
                target("date-range"),
                "Pick a time window",
                "All dashboard widgets follow the selected date range.",
            )
            .position(StepPosition::Bottom),
            StepSpec::new(
                target("reply-rate-chart"),
                "Reply rate",
                "The reply rate is the strongest signal that your copy resonates.",
            )
            .showcase(ShowcaseKind::Metrics)
            .highlight(["reply rate"]),
            StepSpec::new(
                target("activity-feed"),
                "Recent activity",
                "Replies and bounces show up here the moment they arrive.",
            )
            .position(StepPosition::Left),
        ],
    )
}

fn campaign() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Campaign,
        "Campaign builder tour",
        "/campaigns",
        vec![
            StepSpec::new(
                target("campaign-name"),
                "Name your campaign",
                "Use a name your team will recognise in reports.",
            ),
            StepSpec::new(
                target("sequence-editor"),
                "Build the sequence",
                "Add follow-up steps and set the delay between each email.",
            )
            .showcase(ShowcaseKind::Sequence)
            .media("campaign/sequence.webp")
            .highlight(["follow-up", "delay"]),
            StepSpec::new(
                target("audience-picker"),
                "Choose the audience",
                "Select a lead list or a saved filter to receive this campaign.",
            ),
            StepSpec::new(
                target("schedule-panel"),
                "Schedule sending",
                "Restrict sending to business hours in each lead's timezone.",
            )
            .pro_tip("Tuesday to Thursday mornings usually get the best reply rates."),
            StepSpec::new(
                target("launch-button"),
                "Launch",
                "Review the summary and launch when you are ready.",
            )
            .position(StepPosition::Top),
        ],
    )
}

fn leads() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Leads,
        "Leads tour",
        "/leads",
        vec![
            StepSpec::new(
                target("import-leads"),
                "Import leads",
                "Upload a CSV or connect your CRM to bring contacts in.",
            )
            .highlight(["CSV", "CRM"]),
            StepSpec::new(
                target("lead-filters"),
                "Segment your list",
                "Filter by company size, title or engagement to build focused lists.",
            )
            .position(StepPosition::Right),
            StepSpec::new(
                target("lead-status"),
                "Follow every conversation",
                "Each lead moves through statuses as they open and reply.",
            )
            .showcase(ShowcaseKind::Pipeline),
        ],
    )
}

fn templates() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Templates,
        "Templates tour",
        "/templates",
        vec![
            StepSpec::new(
                target("template-library"),
                "Template library",
                "Start from a proven template or write your own.",
            ),
            StepSpec::new(
                target("variable-picker"),
                "Personalise with variables",
                "Insert variables like first name or company to personalise every email.",
            )
            .highlight(["first name", "company"])
            .pro_tip("Fallback values keep emails readable when a field is empty."),
            StepSpec::new(
                target("template-preview"),
                "Preview before sending",
                "Preview renders the template against a real lead from your list.",
            )
            .position(StepPosition::Left)
            .media("templates/preview.webp"),
        ],
    )
}

fn accounts() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Accounts,
        "Sending accounts tour",
        "/accounts",
        vec![
            StepSpec::new(
                target("connect-account"),
                "Connect a mailbox",
                "Connect Google, Microsoft or any SMTP mailbox to send from.",
            ),
            StepSpec::new(
                target("warmup-toggle"),
                "Warm up new mailboxes",
                "Warmup gradually raises sending volume to protect deliverability.",
            )
            .showcase(ShowcaseKind::Warmup)
            .highlight(["deliverability"]),
            StepSpec::new(
                target("daily-limit"),
                "Set a daily limit",
                "Keep each mailbox under its daily limit to avoid spam filters.",
            )
            .position(StepPosition::Top),
        ],
    )
}

fn autopilot() -> Result<TourDefinition, CatalogError> {
    TourDefinition::new(
        TourId::Autopilot,
        "Autopilot tour",
        "/autopilot",
        vec![
            StepSpec::new(
                target("autopilot-goal"),
                "Describe your goal",
                "Tell autopilot who you want to reach and what you offer.",
            )
            .media("autopilot/goal.webp"),
            StepSpec::new(
                target("autopilot-inbox"),
                "Review replies",
                "Autopilot drafts answers to replies; approve them from the inbox.",
            )
            .showcase(ShowcaseKind::Inbox)
            .highlight(["drafts", "approve"]),
            StepSpec::new(
                target("autopilot-toggle"),
                "Turn it on",
                "Switch autopilot on and it will keep campaigns running for you.",
            )
            .position(StepPosition::Bottom)
            .keyboard_hint("Press Enter to finish"),
        ],
    )
}
