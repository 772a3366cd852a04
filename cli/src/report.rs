use journey::{Journey, JourneySummary};

/// A plain-text rendition of the journey dashboard: overview, insights, and environmental impact.
pub fn render(journey: &Journey) -> String {
    let summary = &journey.summary;
    let center = summary.center_point();
    let mut lines = vec![
        "Journey overview".to_string(),
        format!("  Samples: {}", summary.sample_count),
        format!("  From {} to {}", summary.start, summary.end),
        format!(
            "  Total duration: {:.1} hours",
            summary.total_duration_hours()
        ),
        format!("  Total distance: {:.1} km", summary.total_distance_km),
        format!("  Average speed: {:.1} km/h", summary.average_speed_kmh),
        format!("  Map center: {:.6}, {:.6}", center.y(), center.x()),
        String::new(),
        "Speed pattern".to_string(),
        format!(
            "  Speed consistency (std dev): {:.2} km/h",
            summary.speed.stddev_kmh
        ),
        format!(
            "  High-speed segments: {}",
            summary.speed.high_speed_segments
        ),
        format!("  Low-speed segments: {}", summary.speed.low_speed_segments),
        String::new(),
        "Route efficiency".to_string(),
        format!("  Straight-line distance: {:.1} km", summary.straight_line_km),
    ];
    lines.push(match summary.efficiency {
        Some(efficiency) => format!("  Efficiency score: {:.2}%", efficiency.ratio * 100.0),
        None => "  Efficiency score: not applicable".to_string(),
    });
    lines.extend([
        String::new(),
        "Environmental impact".to_string(),
        format!(
            "  Estimated fuel: {:.1} L",
            summary.environment.fuel_liters
        ),
        format!(
            "  Estimated CO2 emissions: {:.1} kg",
            summary.environment.co2_kg
        ),
        String::new(),
        "Insights".to_string(),
    ]);
    lines.extend(insights(summary).into_iter().map(|line| format!("  - {line}")));

    lines.join("\n")
}

/// Advice derived from the summary flags.
pub fn insights(summary: &JourneySummary) -> Vec<String> {
    let mut out = Vec::new();
    if summary.speed.high_speed_segments > 0 {
        out.push("Consider more consistent speeds for better fuel efficiency".to_string());
    }
    if summary.rush_hour.morning {
        out.push("Journey intersects with morning rush hour".to_string());
    }
    if summary.rush_hour.evening {
        out.push("Journey intersects with evening rush hour".to_string());
    }
    if summary.rush_hour.morning || summary.rush_hour.evening {
        out.push("Consider adjusting departure time to avoid rush hours".to_string());
        out.push("Plan breaks during peak traffic times".to_string());
    }
    if summary.efficiency.is_some_and(|e| e.inefficient) {
        out.push("Consider more direct routes where possible".to_string());
    }
    if summary.total_distance_km > 0.0 {
        out.push("Maintain consistent speed to optimize fuel efficiency".to_string());
        out.push("Service vehicle regularly for optimal performance".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use journey::EngineConfig;

    use super::*;

    const EVENING_DETOUR: &str = "\
a\t2024-07-09 17:00:00.000000\t30.0\t-97.0
b\t2024-07-09 17:10:00.000000\t30.1\t-97.0
c\t2024-07-09 17:20:00.000000\t30.0\t-97.01
";

    #[test]
    fn detour_in_evening_rush() {
        let journey = Journey::analyze(EVENING_DETOUR, &EngineConfig::default()).unwrap();
        let advice = insights(&journey.summary);
        assert!(advice.contains(&"Journey intersects with evening rush hour".to_string()));
        assert!(advice.contains(&"Consider more direct routes where possible".to_string()));
        assert!(!advice.contains(&"Journey intersects with morning rush hour".to_string()));

        let report = render(&journey);
        assert!(report.contains("Total duration: 0.3 hours"));
        assert!(report.contains("Efficiency score: "));
        assert!(report.contains("Map center: 30.033333, -97.003333"));
    }

    #[test]
    fn parked_vehicle() {
        let raw = "a\t2024-07-09 02:00:00.000000\t30.0\t-97.0\n\
                   b\t2024-07-09 02:10:00.000000\t30.0\t-97.0\n";
        let journey = Journey::analyze(raw, &EngineConfig::default()).unwrap();
        assert!(insights(&journey.summary).is_empty());
        assert!(render(&journey).contains("Efficiency score: not applicable"));
    }
}
