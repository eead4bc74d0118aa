//! End-to-end tests: CSV text in, rendered scene and serialized output out,
//! exercising the public API the way an embedding application would.

use plotforge::charts::{chart_by_id, render_chart, Mapping};
use plotforge::data::is_numeric;
use plotforge::interact::{zoomed_scene, Tooltip, ZoomTransform};
use plotforge::project::Project;
use plotforge::scene::Shape;
use plotforge::{export, ingest, svg, RenderOptions};

const IRIS_CSV: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.4,3.2,4.5,1.5,versicolor
6.3,3.3,6.0,2.5,virginica
5.8,2.7,5.1,1.9,virginica
";

fn mapping(pairs: &[(&str, &str)]) -> Mapping {
    pairs
        .iter()
        .map(|(dim, col)| (dim.to_string(), vec![col.to_string()]))
        .collect()
}

#[test]
fn test_csv_to_scatter_svg() {
    let data = ingest::read_csv(IRIS_CSV.as_bytes()).unwrap();
    assert!(is_numeric(&data, "sepal_length"));
    assert!(!is_numeric(&data, "species"));

    let scene = render_chart(
        chart_by_id("scatterplot").unwrap(),
        &data,
        &mapping(&[
            ("x", "sepal_length"),
            ("y", "sepal_width"),
            ("color", "species"),
            ("size", "petal_length"),
        ]),
        &RenderOptions::default(),
    );
    assert_eq!(scene.marks.len(), 6);
    assert_eq!(scene.legend.as_ref().unwrap().entries.len(), 3);
    assert!(scene.zoom.is_some());

    let document = svg::document(&scene);
    assert!(document.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert_eq!(document.matches("<circle").count(), 6);
}

#[test]
fn test_bar_rollup_scenario() {
    // The canonical rollup scenario: a=1 appears twice (10 + 5), a=2 once.
    let data = ingest::read_csv("a,b\n1,10\n2,20\n1,5\n".as_bytes()).unwrap();
    let scene = render_chart(
        chart_by_id("barchart").unwrap(),
        &data,
        &mapping(&[("x", "a"), ("y", "b")]),
        &RenderOptions::default(),
    );
    assert_eq!(scene.marks.len(), 2);
    assert_eq!(scene.marks[0].tooltip.as_deref(), Some("2\nTotal: 20"));
    assert_eq!(scene.marks[1].tooltip.as_deref(), Some("1\nTotal: 15"));
}

#[test]
fn test_missing_required_dimension_yields_empty_scene_for_all_archetypes() {
    let data = ingest::read_csv(IRIS_CSV.as_bytes()).unwrap();
    let incomplete = mapping(&[("x", "species")]);
    for def in plotforge::charts::registry() {
        let scene = render_chart(def, &data, &incomplete, &RenderOptions::default());
        assert!(scene.is_empty(), "'{}' should render nothing", def.id);
        let document = svg::document(&scene);
        assert!(!document.contains("<circle"));
        assert!(!document.contains("<path"));
    }
}

#[test]
fn test_single_category_pie_full_circle() {
    let data = ingest::read_csv("kind,total\nonly,42\n".as_bytes()).unwrap();
    let scene = render_chart(
        chart_by_id("piechart").unwrap(),
        &data,
        &mapping(&[("x", "kind"), ("y", "total")]),
        &RenderOptions::default(),
    );
    assert_eq!(scene.marks.len(), 1);
    match scene.marks[0].shape {
        Shape::Slice { start, end, .. } => {
            assert!(end - start > std::f64::consts::TAU - 0.02);
        }
        _ => panic!("expected a slice"),
    }
}

#[test]
fn test_zoom_floor_clamps_before_reprojection() {
    let data = ingest::read_csv("x,y\n0,0\n10,100\n".as_bytes()).unwrap();
    let scene = render_chart(
        chart_by_id("linechart").unwrap(),
        &data,
        &mapping(&[("x", "x"), ("y", "y")]),
        &RenderOptions::default(),
    );
    assert!(scene.zoom.is_some());
    let below_floor = zoomed_scene(&scene, &ZoomTransform::new(0.4, 0.0, 0.0));
    let at_floor = zoomed_scene(&scene, &ZoomTransform::new(0.5, 0.0, 0.0));
    assert_eq!(below_floor.marks, at_floor.marks);
}

#[test]
fn test_hover_and_tooltip_flow() {
    let data = ingest::read_csv(IRIS_CSV.as_bytes()).unwrap();
    let scene = render_chart(
        chart_by_id("scatterplot").unwrap(),
        &data,
        &mapping(&[("x", "sepal_length"), ("y", "sepal_width")]),
        &RenderOptions::default(),
    );

    let styles = plotforge::interact::hover_styles(&scene, 2);
    assert_eq!(styles[2].as_ref().unwrap().opacity, 1.0);
    assert_eq!(styles[0].as_ref().unwrap().opacity, 0.2);

    let mut tooltip = Tooltip::default();
    tooltip.show(&scene, 2, (300.0, 150.0));
    assert!(tooltip.visible);
    assert!(tooltip.text.contains("sepal_width"));
    tooltip.hide();
    assert!(!tooltip.visible);
}

#[test]
fn test_stale_marks_never_leak_across_renders() {
    let data = ingest::read_csv(IRIS_CSV.as_bytes()).unwrap();
    let def = chart_by_id("scatterplot").unwrap();
    let full = mapping(&[("x", "sepal_length"), ("y", "sepal_width")]);
    let scene = render_chart(def, &data, &full, &RenderOptions::default());
    assert!(!scene.marks.is_empty());

    // Removing the y mapping fully replaces the scene with an empty one.
    let scene = render_chart(
        def,
        &data,
        &mapping(&[("x", "sepal_length")]),
        &RenderOptions::default(),
    );
    assert!(scene.is_empty());
}

#[test]
fn test_png_export_at_double_resolution() {
    let data = ingest::read_csv("a,b\nfoo,3\nbar,1\n".as_bytes()).unwrap();
    let options = RenderOptions {
        width: 160.0,
        height: 120.0,
        ..Default::default()
    };
    let scene = render_chart(
        chart_by_id("treemap").unwrap(),
        &data,
        &mapping(&[("x", "a"), ("y", "b")]),
        &options,
    );
    let png = export::to_png(&scene).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    assert_eq!(w, 320);
}

#[test]
fn test_project_save_load_restores_state() {
    let data = ingest::read_csv(IRIS_CSV.as_bytes()).unwrap();
    let m = mapping(&[("x", "species"), ("y", "petal_length")]);
    let project = Project::new(
        1_700_000_000_000,
        data,
        m.clone(),
        RenderOptions::default(),
        "barchart",
    );

    let json = project.to_json().unwrap();
    let restored = Project::from_json(&json).unwrap();
    assert_eq!(restored.mapping, m);

    let def = restored.resolve_chart().expect("archetype still registered");
    let scene = render_chart(def, &restored.data, &restored.mapping, &restored.options);
    assert!(!scene.marks.is_empty());
}

#[test]
fn test_project_with_retired_chart_keeps_current_archetype() {
    let data = ingest::read_csv("a,b\n1,2\n".as_bytes()).unwrap();
    let mut project = Project::new(0, data, Mapping::new(), RenderOptions::default(), "sunburst");
    assert!(project.resolve_chart().is_none());
    project.chart_id = "linechart".into();
    assert!(project.resolve_chart().is_some());
}
