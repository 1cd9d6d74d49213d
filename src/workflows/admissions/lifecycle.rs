//! Fixed five-milestone progress model and the status narration shown next
//! to it. Neither owns a transition function; external actors set the status
//! and this module renders it.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::workflows::admissions::domain::ApplicationStatus;

use ApplicationStatus::*;

/// Progress state of one milestone relative to the application's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneState {
    Completed,
    Current,
    Upcoming,
}

impl MilestoneState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Current => "Current",
            Self::Upcoming => "Upcoming",
        }
    }
}

/// One fixed milestone: a day offset from the reference date plus the status
/// memberships that mark it completed or current. Anything else is upcoming.
#[derive(Debug, Clone)]
pub struct MilestoneTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub offset_days: i64,
    pub completed_when: &'static [ApplicationStatus],
    pub current_when: &'static [ApplicationStatus],
}

impl MilestoneTemplate {
    fn state_for(&self, status: ApplicationStatus) -> MilestoneState {
        if self.completed_when.contains(&status) {
            MilestoneState::Completed
        } else if self.current_when.contains(&status) {
            MilestoneState::Current
        } else {
            MilestoneState::Upcoming
        }
    }
}

/// Rendered milestone handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub date: NaiveDate,
    pub state: MilestoneState,
    pub state_label: &'static str,
}

#[derive(Debug)]
pub struct TimelineBlueprint {
    milestones: Vec<MilestoneTemplate>,
}

impl TimelineBlueprint {
    pub fn standard() -> Self {
        Self {
            milestones: standard_milestones(),
        }
    }

    pub fn milestones(&self) -> &[MilestoneTemplate] {
        &self.milestones
    }

    /// Render the full timeline for a status. Always five events, dates
    /// non-decreasing from `start`.
    pub fn timeline_for(
        &self,
        status: ApplicationStatus,
        start: NaiveDate,
    ) -> Vec<TimelineEvent> {
        self.milestones
            .iter()
            .map(|milestone| {
                let state = milestone.state_for(status);
                TimelineEvent {
                    key: milestone.key,
                    title: milestone.title,
                    description: milestone.description,
                    date: start + Duration::days(milestone.offset_days),
                    state,
                    state_label: state.label(),
                }
            })
            .collect()
    }
}

fn standard_milestones() -> Vec<MilestoneTemplate> {
    vec![
        MilestoneTemplate {
            key: "application_started",
            title: "Application Started",
            description: "Profile captured and schools selected.",
            offset_days: 0,
            completed_when: &[
                Draft,
                DocumentsPending,
                UnderReview,
                Shortlisted,
                InterviewScheduled,
                Accepted,
                Waitlisted,
                Rejected,
            ],
            current_when: &[],
        },
        MilestoneTemplate {
            key: "documents_verification",
            title: "Documents Verification",
            description: "Uploaded documents are checked against the profile.",
            offset_days: 1,
            completed_when: &[
                UnderReview,
                Shortlisted,
                InterviewScheduled,
                Accepted,
                Waitlisted,
                Rejected,
            ],
            current_when: &[Draft, DocumentsPending],
        },
        MilestoneTemplate {
            key: "school_review",
            title: "School Review",
            description: "The school's admission team evaluates the application.",
            offset_days: 3,
            completed_when: &[],
            current_when: &[UnderReview, Shortlisted, InterviewScheduled, Accepted],
        },
        MilestoneTemplate {
            key: "interview_assessment",
            title: "Interview/Assessment",
            description: "Interaction session with the child and parents.",
            offset_days: 7,
            completed_when: &[Accepted],
            current_when: &[InterviewScheduled],
        },
        MilestoneTemplate {
            key: "final_decision",
            title: "Final Decision",
            description: "The school issues its admission decision.",
            offset_days: 14,
            completed_when: &[Accepted, Rejected],
            current_when: &[Waitlisted],
        },
    ]
}

/// Canned narration templates keyed by status. `{school}` is replaced by the
/// selected school's name when one is supplied.
#[derive(Debug)]
pub struct StatusNarrator {
    templates: BTreeMap<ApplicationStatus, Vec<&'static str>>,
}

impl StatusNarrator {
    pub fn standard() -> Self {
        let mut templates: BTreeMap<ApplicationStatus, Vec<&'static str>> = BTreeMap::new();
        templates.insert(
            Draft,
            vec![
                "Your application is saved as a draft. Complete the checklist to submit it.",
                "Draft in progress. Pick schools and upload documents when you are ready.",
            ],
        );
        templates.insert(
            DocumentsPending,
            vec![
                "We are waiting on a few documents before sending your application to {school}.",
                "Some documents are still pending verification. Upload them to move ahead.",
            ],
        );
        templates.insert(
            UnderReview,
            vec![
                "{school} is reviewing your application.",
                "The admissions team at {school} has your file under review.",
            ],
        );
        templates.insert(
            Shortlisted,
            vec![
                "Great news! {school} has shortlisted your application.",
                "Your application made the shortlist at {school}.",
            ],
        );
        templates.insert(
            InterviewScheduled,
            vec![
                "{school} has scheduled an interaction session. Watch your inbox for the slot.",
                "Interview scheduled with {school}. Please carry the original documents.",
            ],
        );
        templates.insert(
            Accepted,
            vec![
                "Congratulations! {school} has offered admission.",
                "Admission confirmed at {school}. Fee payment details will follow.",
            ],
        );
        templates.insert(
            Waitlisted,
            vec![
                "{school} has placed your application on the waitlist.",
                "You are on the waitlist at {school}. Seats open up as offers lapse.",
            ],
        );
        templates.insert(
            Rejected,
            vec![
                "{school} could not offer a seat this session.",
                "Unfortunately {school} declined the application this year.",
            ],
        );

        Self { templates }
    }

    pub fn templates_for(&self, status: ApplicationStatus) -> &[&'static str] {
        self.templates
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Pick one narration with caller-supplied randomness so tests can seed
    /// the source and assert exact output.
    pub fn narrate_with<R: Rng + ?Sized>(
        &self,
        status: ApplicationStatus,
        school_name: Option<&str>,
        rng: &mut R,
    ) -> String {
        let template = self
            .templates_for(status)
            .choose(rng)
            .copied()
            .unwrap_or("Status update unavailable.");

        template.replace("{school}", school_name.unwrap_or("the school"))
    }

    /// Production convenience over `narrate_with` and the thread RNG.
    pub fn narrate(&self, status: ApplicationStatus, school_name: Option<&str>) -> String {
        self.narrate_with(status, school_name, &mut rand::thread_rng())
    }
}
