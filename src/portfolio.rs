use std::collections::VecDeque;

use chrono::NaiveDate;

/// Entries the activity feed keeps before old ones fall off.
pub const ACTIVITY_LOG_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Minor,
    Moderate,
    Critical,
}

impl Severity {
    /// Points a finding of this severity takes off a building's score.
    pub fn deduction(self) -> u32 {
        match self {
            Severity::Minor => 2,
            Severity::Moderate => 8,
            Severity::Critical => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    pub address: String,
    pub findings: Vec<Finding>,
    /// Average-equivalent score from the previous inspection round.
    pub previous_score: u8,
}

/// 100 minus the summed finding deductions, floored at 0.
pub fn health_score(building: &Building) -> u8 {
    let deductions: u32 = building
        .findings
        .iter()
        .map(|f| f.severity.deduction())
        .sum();
    100u32.saturating_sub(deductions) as u8
}

pub fn average_score(buildings: &[Building]) -> f64 {
    if buildings.is_empty() {
        return 0.0;
    }
    let total: f64 = buildings.iter().map(|b| health_score(b) as f64).sum();
    total / buildings.len() as f64
}

/// Current portfolio average minus the previous round's average.
pub fn trend_delta(buildings: &[Building]) -> f64 {
    if buildings.is_empty() {
        return 0.0;
    }
    let previous: f64 = buildings.iter().map(|b| b.previous_score as f64).sum();
    average_score(buildings) - previous / buildings.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    Pending,
    Accepted,
    Declined,
}

impl VisitStatus {
    pub fn label(self) -> &'static str {
        match self {
            VisitStatus::Pending => "pending",
            VisitStatus::Accepted => "accepted",
            VisitStatus::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Visit {
    pub building: String,
    pub date: NaiveDate,
    pub crew: String,
    pub status: VisitStatus,
}

#[derive(Debug, Clone)]
pub struct Agreement {
    pub building: String,
    pub plan: String,
    pub visits_per_year: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Open,
    Overdue,
}

impl InvoiceStatus {
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Open => "open",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Invoice {
    pub number: String,
    pub building: String,
    pub amount_cents: u64,
    pub due: NaiveDate,
    pub status: InvoiceStatus,
}

/// Everything the dashboard sections render. The crate ships a demo data
/// set; the service company's backend is not part of this tool.
pub struct Portfolio {
    pub buildings: Vec<Building>,
    pub visits: Vec<Visit>,
    pub agreements: Vec<Agreement>,
    pub invoices: Vec<Invoice>,
    pub activity: VecDeque<String>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Portfolio {
    pub fn sample() -> Self {
        let buildings = vec![
            Building {
                name: "Harbor Mill".to_string(),
                address: "14 Dockside Ave".to_string(),
                findings: vec![
                    Finding {
                        severity: Severity::Moderate,
                        note: "Ponding near the north drain".to_string(),
                    },
                    Finding {
                        severity: Severity::Minor,
                        note: "Loose cap flashing, east parapet".to_string(),
                    },
                ],
                previous_score: 86,
            },
            Building {
                name: "Cedar Point Offices".to_string(),
                address: "220 Cedar Point Rd".to_string(),
                findings: vec![Finding {
                    severity: Severity::Critical,
                    note: "Membrane split above unit 3B".to_string(),
                }],
                previous_score: 88,
            },
            Building {
                name: "Granville Depot".to_string(),
                address: "7 Granville Loop".to_string(),
                findings: vec![],
                previous_score: 97,
            },
            Building {
                name: "Westfield Annex".to_string(),
                address: "901 Westfield St".to_string(),
                findings: vec![
                    Finding {
                        severity: Severity::Minor,
                        note: "Debris in gutter run".to_string(),
                    },
                    Finding {
                        severity: Severity::Minor,
                        note: "Sealant shrinkage at skylight curb".to_string(),
                    },
                ],
                previous_score: 93,
            },
        ];

        let visits = vec![
            Visit {
                building: "Harbor Mill".to_string(),
                date: date(2026, 9, 3),
                crew: "Crew A".to_string(),
                status: VisitStatus::Pending,
            },
            Visit {
                building: "Cedar Point Offices".to_string(),
                date: date(2026, 9, 8),
                crew: "Crew B".to_string(),
                status: VisitStatus::Pending,
            },
            Visit {
                building: "Westfield Annex".to_string(),
                date: date(2026, 9, 15),
                crew: "Crew A".to_string(),
                status: VisitStatus::Accepted,
            },
            Visit {
                building: "Granville Depot".to_string(),
                date: date(2026, 10, 1),
                crew: "Crew C".to_string(),
                status: VisitStatus::Pending,
            },
        ];

        let agreements = vec![
            Agreement {
                building: "Harbor Mill".to_string(),
                plan: "Standard".to_string(),
                visits_per_year: 2,
                active: true,
            },
            Agreement {
                building: "Cedar Point Offices".to_string(),
                plan: "Premium".to_string(),
                visits_per_year: 4,
                active: true,
            },
            Agreement {
                building: "Granville Depot".to_string(),
                plan: "Standard".to_string(),
                visits_per_year: 2,
                active: true,
            },
            Agreement {
                building: "Westfield Annex".to_string(),
                plan: "Basic".to_string(),
                visits_per_year: 1,
                active: false,
            },
        ];

        let invoices = vec![
            Invoice {
                number: "INV-2026-041".to_string(),
                building: "Harbor Mill".to_string(),
                amount_cents: 128_500,
                due: date(2026, 8, 15),
                status: InvoiceStatus::Overdue,
            },
            Invoice {
                number: "INV-2026-044".to_string(),
                building: "Cedar Point Offices".to_string(),
                amount_cents: 245_000,
                due: date(2026, 9, 10),
                status: InvoiceStatus::Open,
            },
            Invoice {
                number: "INV-2026-038".to_string(),
                building: "Granville Depot".to_string(),
                amount_cents: 96_000,
                due: date(2026, 7, 30),
                status: InvoiceStatus::Paid,
            },
        ];

        let activity = VecDeque::from([
            "Inspection report filed for Cedar Point Offices".to_string(),
            "Visit to Westfield Annex on Sep 15 accepted".to_string(),
            "Invoice INV-2026-038 paid".to_string(),
        ]);

        Portfolio {
            buildings,
            visits,
            agreements,
            invoices,
            activity,
        }
    }

    /// Indices into `visits` that are still awaiting a decision, soonest
    /// first.
    pub fn pending_visits(&self) -> Vec<usize> {
        let mut pending: Vec<usize> = self
            .visits
            .iter()
            .enumerate()
            .filter(|(_, v)| v.status == VisitStatus::Pending)
            .map(|(i, _)| i)
            .collect();
        pending.sort_by_key(|&i| self.visits[i].date);
        pending
    }

    pub fn outstanding_cents(&self) -> u64 {
        self.invoices
            .iter()
            .filter(|i| i.status != InvoiceStatus::Paid)
            .map(|i| i.amount_cents)
            .sum()
    }

    pub fn accept_visit(&mut self, index: usize) -> Option<String> {
        self.decide_visit(index, VisitStatus::Accepted)
    }

    pub fn decline_visit(&mut self, index: usize) -> Option<String> {
        self.decide_visit(index, VisitStatus::Declined)
    }

    /// Move a pending visit to its decided state. Returns the activity-feed
    /// message, or `None` when the index is stale or the visit was already
    /// decided.
    fn decide_visit(&mut self, index: usize, decision: VisitStatus) -> Option<String> {
        let visit = self.visits.get_mut(index)?;
        if visit.status != VisitStatus::Pending {
            return None;
        }
        visit.status = decision;
        let message = format!(
            "Visit to {} on {} {}",
            visit.building,
            visit.date.format("%b %-d"),
            decision.label()
        );
        self.log_activity(message.clone());
        Some(message)
    }

    pub fn log_activity(&mut self, entry: String) {
        self.activity.push_front(entry);
        if self.activity.len() > ACTIVITY_LOG_CAPACITY {
            self.activity.pop_back();
        }
    }
}
