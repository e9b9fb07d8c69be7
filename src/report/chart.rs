use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, NameLocation,
        SplitLine, Symbol, TextAlign, TextStyle, Tooltip,
    },
    series::Line,
};

use crate::models::ExperimentSummaryPoint;

const MEAN_COLOR: &str = "#5470C6";
const MEDIAN_COLOR: &str = "#EE6666";

/// Columns of the chart, one entry per collected point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesData {
    /// Seconds since the first point.
    pub elapsed_s: Vec<f64>,
    /// Bytes sent between consecutive points, 0 for the first one.
    pub sent_bytes: Vec<f64>,
    pub broker_latency_mean: Vec<f64>,
    pub broker_latency_median: Vec<f64>,
    pub send_receive_latency_mean: Vec<f64>,
    pub send_receive_latency_median: Vec<f64>,
}

impl SeriesData {
    pub fn from_points(points: &[ExperimentSummaryPoint]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let mut data = Self::default();
        let mut previous_total = None;
        for point in points {
            let summary = &point.experiment_summary;
            let total = summary.sent_bytes();

            data.elapsed_s
                .push((point.timestamp_ms - first.timestamp_ms) as f64 / 1000.0);
            data.sent_bytes
                .push(previous_total.map_or(0.0, |previous| total - previous));
            data.broker_latency_mean.push(summary.broker_latency.mean);
            data.broker_latency_median.push(summary.broker_latency.median);
            data.send_receive_latency_mean
                .push(summary.send_receive_latency.mean);
            data.send_receive_latency_median
                .push(summary.send_receive_latency.median);
            previous_total = Some(total);
        }
        data
    }

    fn points(&self, values: &[f64]) -> Vec<Vec<f64>> {
        self.elapsed_s
            .iter()
            .zip(values)
            .map(|(x, y)| vec![*x, *y])
            .collect()
    }
}

struct Panel {
    title: &'static str,
    unit: &'static str,
    log_scale: bool,
}

const PANELS: [Panel; 3] = [
    Panel {
        title: "Sent bytes",
        unit: "bytes",
        log_scale: true,
    },
    Panel {
        title: "Kafka latencies",
        unit: "latency (ms)",
        log_scale: false,
    },
    Panel {
        title: "Send/receive latencies",
        unit: "latency (ms)",
        log_scale: false,
    },
];

/// Three stacked panels sharing the elapsed time axis: sent bytes on a log
/// scale, then mean/median broker latency and mean/median send/receive latency.
pub fn build_chart(experiment_name: &str, data: &SeriesData) -> Chart {
    let mut chart = Chart::new()
        .title(
            Title::new()
                .text(format!("Summary for {experiment_name}"))
                .text_align(TextAlign::Center)
                .text_style(TextStyle::new().font_size(20).font_weight("bold"))
                .left("50%")
                .top("1%"),
        )
        .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
        .legend(Legend::new().show(true).right("2%").top("1%"));

    for (idx, panel) in PANELS.iter().enumerate() {
        let top = 10 + idx * 30;
        let bottom = 100 - (top + 20);

        chart = chart
            .title(
                Title::new()
                    .text(panel.title)
                    .text_align(TextAlign::Center)
                    .text_style(TextStyle::new().font_size(14))
                    .left("50%")
                    .top(format!("{}%", top - 4).as_str()),
            )
            .grid(
                Grid::new()
                    .left("8%")
                    .right("8%")
                    .top(format!("{top}%").as_str())
                    .bottom(format!("{bottom}%").as_str()),
            )
            .x_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .grid_index(idx as f64)
                    .name("time (s)")
                    .name_location(NameLocation::End)
                    .axis_label(AxisLabel::new().formatter("{value} s"))
                    .split_line(SplitLine::new().show(true)),
            )
            .y_axis(
                Axis::new()
                    .type_(if panel.log_scale {
                        AxisType::Log
                    } else {
                        AxisType::Value
                    })
                    .grid_index(idx as f64)
                    .name(panel.unit)
                    .name_location(NameLocation::End)
                    .split_line(SplitLine::new().show(true)),
            );
    }

    let series = [
        (0, "sent bytes", data.points(&data.sent_bytes), MEAN_COLOR),
        (1, "kafka mean", data.points(&data.broker_latency_mean), MEAN_COLOR),
        (1, "kafka median", data.points(&data.broker_latency_median), MEDIAN_COLOR),
        (
            2,
            "send/receive mean",
            data.points(&data.send_receive_latency_mean),
            MEAN_COLOR,
        ),
        (
            2,
            "send/receive median",
            data.points(&data.send_receive_latency_median),
            MEDIAN_COLOR,
        ),
    ];
    for (panel, name, points, color) in series {
        chart = chart.series(
            Line::new()
                .name(name)
                .data(points)
                .symbol(Symbol::Circle)
                .symbol_size(6.0)
                .line_style(LineStyle::new().width(2.0))
                .item_style(ItemStyle::new().color(color))
                .x_axis_index(panel as f64)
                .y_axis_index(panel as f64),
        );
    }

    chart
}
