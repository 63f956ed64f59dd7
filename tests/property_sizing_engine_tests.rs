use histogram_chart::api::{
    AxisSettings, MAX_LAYOUT_PASSES, bar_info, compute_layout, resolve_geometry_settings,
};
use histogram_chart::core::{BinnedSeries, DataConverter};
use proptest::prelude::*;

fn series(values: &[f64]) -> BinnedSeries {
    BinnedSeries::from_counts(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("bin {index}"), *value)),
    )
}

proptest! {
    #[test]
    fn layout_is_pure_and_well_formed(
        values in proptest::collection::vec(-1_000_000.0f64..1_000_000.0, 1..80),
        width in 0.0f64..2_000.0,
        height in 0.0f64..1_200.0,
        text_size in 6.0f64..24.0,
        show_x in any::<bool>(),
        show_y in any::<bool>(),
    ) {
        let converter = series(&values);
        let x_axis = if show_x { AxisSettings::default() } else { AxisSettings::hidden() };
        let y_axis = if show_y { AxisSettings::default() } else { AxisSettings::hidden() };
        let settings = resolve_geometry_settings(text_size, &x_axis, &y_axis);

        let first = compute_layout(&settings, Some(&converter as &dyn DataConverter), width, height)
            .expect("layout");
        let second = compute_layout(&settings, Some(&converter as &dyn DataConverter), width, height)
            .expect("layout");
        prop_assert_eq!(&first, &second);

        prop_assert!(first.passes >= 1 && first.passes <= MAX_LAYOUT_PASSES);
        for value in [
            first.margin.top,
            first.margin.right,
            first.margin.bottom,
            first.margin.left,
            first.plot.width,
            first.plot.height,
            first.y1_axis.width,
            first.x1_axis.height,
        ] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
        prop_assert!(first.x1_axis.label_step >= 1);
        prop_assert!(first.y1_axis.domain.0 < first.y1_axis.domain.1);
    }

    #[test]
    fn bars_fit_the_plot_width(
        values in proptest::collection::vec(0.0f64..10_000.0, 1..120),
        width in 0.0f64..2_000.0,
        height in 0.0f64..1_200.0,
    ) {
        let converter = series(&values);
        let settings =
            resolve_geometry_settings(12.0, &AxisSettings::default(), &AxisSettings::default());
        let layout = compute_layout(&settings, Some(&converter as &dyn DataConverter), width, height)
            .expect("layout");
        let geometry = bar_info(&layout);

        prop_assert!(geometry.bar_size >= 0.0);
        prop_assert!(geometry.bar_gap >= 0.0);
        let n = layout.bin_count as f64;
        let used = n * geometry.bar_size + (n - 1.0) * geometry.bar_gap;
        prop_assert!(used <= layout.plot.width + 1e-6);
    }
}
