//! Console output formatter for pre-plans and journeys

use colored::Colorize;
use travel_application::{BackendStatus, JourneyIssue, PlanningState};
use travel_domain::{
    Departure, DepartureBoard, Journey, Leg, OutputFormat, PrePlan, SearchParams, StationRef,
};

/// Formats planning results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render the parts of the state a search produced
    pub fn format_state(state: &PlanningState, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(state),
            OutputFormat::Full | OutputFormat::Summary => {
                let mut output = String::new();
                if let Some(error) = state.error_message() {
                    output.push_str(&Self::format_error(error));
                    output.push('\n');
                }
                output.push_str(&Self::format_journeys(
                    &state.journeys,
                    &state.journey_defects,
                    format,
                ));
                output
            }
        }
    }

    /// Format the assistant's reply and what it understood so far
    pub fn format_pre_plan(pre_plan: &PrePlan) -> String {
        if pre_plan.is_failure() {
            return Self::format_error(&pre_plan.message);
        }

        let mut output = format!("{} {}\n", "Assistant:".cyan().bold(), pre_plan.message);
        if !pre_plan.search_params.is_empty() {
            output.push_str(&Self::format_params(&pre_plan.search_params));
        }
        output
    }

    /// Format search parameters, one field per line
    pub fn format_params(params: &SearchParams) -> String {
        let mut output = String::new();
        let mut field = |label: &str, value: Option<String>| {
            output.push_str(&format!(
                "  {:<14} {}\n",
                format!("{}:", label).dimmed(),
                value.unwrap_or_else(|| "-".to_string())
            ));
        };

        field("From", params.origin().map(str::to_string));
        field("To", params.destination().map(str::to_string));
        field(
            "Departure",
            params
                .departure_time
                .map(|t| t.format("%a %d %b %H:%M").to_string()),
        );
        if let Some(via) = params.via_station() {
            let transfer = params
                .effective_min_transfer_time()
                .map(|m| format!(" (min. {} min transfer)", m))
                .unwrap_or_default();
            field("Via", Some(format!("{}{}", via, transfer)));
        }
        output
    }

    /// Format journeys in backend order, followed by any data defects
    pub fn format_journeys(
        journeys: &[Journey],
        defects: &[JourneyIssue],
        format: OutputFormat,
    ) -> String {
        if journeys.is_empty() {
            return format!("{}\n", "No connections found.".yellow());
        }

        let mut output = Self::section_header(&format!("{} connection(s)", journeys.len()));
        for (index, journey) in journeys.iter().enumerate() {
            match format {
                OutputFormat::Full => output.push_str(&Self::format_journey_full(index, journey)),
                _ => output.push_str(&Self::format_journey_summary(index, journey)),
            }
        }

        if !defects.is_empty() {
            output.push_str(&format!("\n{}\n", "Data issues:".yellow().bold()));
            for issue in defects {
                output.push_str(&format!("  * {}: {}\n", issue.journey_id, issue.defect));
            }
        }
        output
    }

    /// One line: times, duration, changes, delay
    pub fn format_journey_summary(index: usize, journey: &Journey) -> String {
        format!(
            "{:>2}. {} → {}  {}  {}{}\n",
            index + 1,
            Self::time_or_dash(journey.departure()).bold(),
            Self::time_or_dash(journey.arrival()).bold(),
            Self::duration(journey.total_minutes),
            Self::transfers(journey.transfers()),
            Self::delay(journey.max_delay_minutes()),
        )
    }

    /// Summary line followed by every leg
    pub fn format_journey_full(index: usize, journey: &Journey) -> String {
        let mut output = format!(
            "\n{}",
            Self::format_journey_summary(index, journey).yellow()
        );
        output.push_str(&format!(
            "    {} → {}\n",
            journey.start_station, journey.end_station
        ));
        if !journey.description.is_empty() {
            output.push_str(&format!("    {}\n", journey.description.dimmed()));
        }
        for leg in journey.legs() {
            output.push_str(&Self::format_leg(leg));
        }
        output
    }

    fn format_leg(leg: &Leg) -> String {
        let platform = leg
            .train
            .platform
            .as_deref()
            .map(|p| format!(", platform {}", p))
            .unwrap_or_default();
        let mut output = format!(
            "    {} {} {}{}\n",
            leg.departure.format("%H:%M"),
            leg.origin.name,
            format!("[{}]", Self::train_label(leg)).cyan(),
            platform
        );
        let intermediate = leg
            .train
            .stops
            .iter()
            .filter(|stop| {
                !stop.station.same_station(&leg.origin)
                    && !stop.station.same_station(&leg.destination)
                    && stop.station.name != leg.origin.name
                    && stop.station.name != leg.destination.name
            })
            .map(|stop| stop.station.name.as_str())
            .collect::<Vec<_>>();
        if !intermediate.is_empty() {
            output.push_str(&format!("      {}\n", intermediate.join(" · ").dimmed()));
        }
        output.push_str(&format!(
            "    {} {}{}\n",
            leg.arrival.format("%H:%M"),
            leg.destination.name,
            Self::delay(leg.delay_minutes.unwrap_or(0))
        ));
        output
    }

    fn train_label(leg: &Leg) -> String {
        match (leg.train.name.as_str(), leg.train.number.as_str()) {
            ("", "") => "train".to_string(),
            (name, "") => name.to_string(),
            (name, number) if number.starts_with(name) => number.to_string(),
            (name, number) => format!("{} {}", name, number),
        }
    }

    /// Format as JSON
    pub fn format_json(state: &PlanningState) -> String {
        let view = serde_json::json!({
            "preplan": state.pre_plan,
            "searchParams": state.search_params,
            "journeys": state.journeys,
            "defects": state.journey_defects,
            "stations": state.stations,
            "error": state.error_message(),
        });
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_stations(stations: &[StationRef]) -> String {
        if stations.is_empty() {
            return format!("{}\n", "No matching stations.".yellow());
        }
        stations
            .iter()
            .map(|station| {
                if station.eva.is_known() {
                    format!("  {} {}\n", station.name, format!("({})", station.eva).dimmed())
                } else {
                    format!("  {}\n", station.name)
                }
            })
            .collect()
    }

    /// Format a live departure board
    pub fn format_board(board: &DepartureBoard, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return serde_json::to_string_pretty(board).unwrap_or_else(|_| "{}".to_string());
        }

        let mut output = Self::section_header(&format!("Departures: {}", board.station));
        if board.is_empty() {
            output.push_str(&format!("{}\n", "No upcoming departures.".yellow()));
            return output;
        }
        for departure in board.departures() {
            output.push_str(&Self::format_departure(departure));
            if format == OutputFormat::Full {
                for message in &departure.messages {
                    output.push_str(&format!("        {}\n", message.dimmed()));
                }
            }
        }
        output
    }

    fn format_departure(departure: &Departure) -> String {
        let mut line = format!(
            "  {}  {:<10} to {}",
            departure.planned.format("%H:%M"),
            departure.train,
            departure.direction
        );
        if let Some(platform) = departure.platform() {
            let platform = format!("Pl. {}", platform);
            if departure.has_platform_change() {
                line.push_str(&format!("  {}", platform.yellow()));
            } else {
                line.push_str(&format!("  {}", platform));
            }
        }
        line.push_str(&Self::delay(departure.delay_minutes.unwrap_or(0)));
        if !departure.is_on_time() {
            line.push_str(&format!(" ({})", departure.departs_at().format("%H:%M")));
        }
        line.push('\n');
        line
    }

    pub fn format_status(status: &BackendStatus) -> String {
        let label = if status.is_ok() {
            status.status.green().bold()
        } else {
            status.status.red().bold()
        };
        let mut output = format!("{} {}\n", "Backend:".cyan().bold(), label);
        if !status.services.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Services:".dimmed(),
                status.services.join(", ")
            ));
        }
        if !status.ticker.is_empty() {
            output.push_str(&Self::section_header("Ticker"));
            for message in &status.ticker {
                output.push_str(&format!("  * {}\n", message));
            }
        }
        output
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn time_or_dash(time: Option<chrono::NaiveDateTime>) -> String {
        time.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    fn duration(minutes: u32) -> String {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }

    fn transfers(count: usize) -> String {
        match count {
            0 => "direct".to_string(),
            1 => "1 change".to_string(),
            n => format!("{} changes", n),
        }
    }

    fn delay(minutes: u32) -> String {
        if minutes == 0 {
            String::new()
        } else {
            format!("  {}", format!("+{}", minutes).red())
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
