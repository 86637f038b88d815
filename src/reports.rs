//! Reports panel. Operates over a static in-memory sample set rather than
//! the remote store.

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub name: &'static str,
    pub team: &'static str,
    pub task_type: &'static str,
    pub completion_rate: u8,
    pub timeframe: &'static str,
    pub date: &'static str,
}

pub fn sample_reports() -> Vec<Report> {
    vec![
        Report {
            name: "Team Performance Report",
            team: "Development",
            task_type: "Project",
            completion_rate: 87,
            timeframe: "Monthly",
            date: "2024-03-01",
        },
        Report {
            name: "Task Analysis Report",
            team: "Design",
            task_type: "BAU",
            completion_rate: 92,
            timeframe: "Weekly",
            date: "2024-03-10",
        },
        Report {
            name: "Sprint Throughput Report",
            team: "Development",
            task_type: "Ad Hoc",
            completion_rate: 78,
            timeframe: "Weekly",
            date: "2024-03-15",
        },
        Report {
            name: "Campaign Delivery Report",
            team: "Marketing",
            task_type: "Project",
            completion_rate: 64,
            timeframe: "Quarterly",
            date: "2024-03-20",
        },
    ]
}

/// Case-insensitive search over name and team, plus exact team and
/// timeframe filters. `None` means no filter on that axis.
pub fn filter_reports(
    reports: &[Report],
    search: Option<&str>,
    team: Option<&str>,
    timeframe: Option<&str>,
) -> Vec<Report> {
    let needle = search.map(|s| s.to_lowercase());
    reports
        .iter()
        .filter(|r| {
            needle.as_deref().map_or(true, |q| {
                r.name.to_lowercase().contains(q) || r.team.to_lowercase().contains(q)
            })
        })
        .filter(|r| team.map_or(true, |t| r.team.eq_ignore_ascii_case(t)))
        .filter(|r| timeframe.map_or(true, |t| r.timeframe.eq_ignore_ascii_case(t)))
        .cloned()
        .collect()
}
