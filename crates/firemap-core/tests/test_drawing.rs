mod common;

use approx::assert_abs_diff_eq;

use common::{at, surface};
use firemap_core::annotation::{ShapeExtent, ShapeKind};
use firemap_core::drawing::{CursorHint, DrawingEngine, Interaction, LeavePolicy, MapTool, PointerOutcome};
use firemap_core::geometry::{ScreenPos, SurfaceBox};
use firemap_core::viewport::Viewport;

#[test]
fn test_pixel_to_surface_percent() {
    let s = surface();
    let p = s.to_surface_percent(ScreenPos::new(200.0, 100.0));
    assert_abs_diff_eq!(p.x, 25.0);
    assert_abs_diff_eq!(p.y, 25.0);

    let back = s.to_screen(p);
    assert_abs_diff_eq!(back.x, 200.0);
    assert_abs_diff_eq!(back.y, 100.0);
}

#[test]
fn test_degenerate_surface_maps_to_zero() {
    let s = SurfaceBox::new(ScreenPos::new(10.0, 10.0), 0.0, 0.0);
    let p = s.to_surface_percent(ScreenPos::new(50.0, 80.0));
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 0.0);
}

#[test]
fn test_circle_radius_is_anchor_to_final_pointer_distance() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::DrawCircle);

    engine.pointer_down(at(20.0, 30.0), &s);
    engine.pointer_move(at(90.0, 90.0), &s, &mut vp);
    let outcome = engine.pointer_up(Some(at(23.0, 34.0)), &s);

    assert_eq!(outcome, PointerOutcome::Committed("shape-1".into()));
    let shape = &engine.annotations()[0];
    assert_eq!(shape.kind(), ShapeKind::Circle);
    assert_abs_diff_eq!(shape.radius().unwrap(), 5.0, epsilon = 1e-3);
    assert_abs_diff_eq!(shape.anchor().x, 20.0, epsilon = 1e-4);
    assert_abs_diff_eq!(shape.anchor().y, 30.0, epsilon = 1e-4);
}

#[test]
fn test_rectangle_bounding_box_is_normalised() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::DrawRectangle);

    // Drag up and to the left of the anchor.
    engine.pointer_down(at(60.0, 70.0), &s);
    engine.pointer_move(at(40.0, 20.0), &s, &mut vp);
    engine.pointer_up(None, &s);

    let b = engine.annotations()[0].bounding_box();
    assert_abs_diff_eq!(b.left, 40.0, epsilon = 1e-4);
    assert_abs_diff_eq!(b.top, 20.0, epsilon = 1e-4);
    assert_abs_diff_eq!(b.width, 20.0, epsilon = 1e-4);
    assert_abs_diff_eq!(b.height, 50.0, epsilon = 1e-4);
}

#[test]
fn test_commit_reverts_tool_to_select() {
    let s = surface();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::DrawRectangle);
    assert_eq!(engine.tool().cursor(), CursorHint::Crosshair);

    engine.pointer_down(at(10.0, 10.0), &s);
    assert!(engine.is_drawing());
    engine.pointer_up(Some(at(20.0, 20.0)), &s);

    assert!(!engine.is_drawing());
    assert_eq!(engine.tool(), MapTool::Select);
    assert_eq!(engine.tool().cursor(), CursorHint::Default);
}

#[test]
fn test_draft_tracks_pointer_until_commit() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::DrawCircle);

    engine.pointer_down(at(50.0, 50.0), &s);
    assert_eq!(engine.draft().unwrap().extent(), None);
    assert!(engine.draft().unwrap().bounding_box().is_none());

    engine.pointer_move(at(50.0, 60.0), &s, &mut vp);
    match engine.draft().unwrap().extent() {
        Some(ShapeExtent::Radius(r)) => assert_abs_diff_eq!(r, 10.0, epsilon = 1e-4),
        other => panic!("unexpected extent {other:?}"),
    }
    assert!(engine.annotations().is_empty());
    assert!(vp.is_initial(), "drawing must not move the viewport");
}

#[test]
fn test_untouched_draft_commits_zero_extent() {
    let s = surface();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::DrawCircle);
    engine.pointer_down(at(30.0, 30.0), &s);
    engine.pointer_up(None, &s);

    assert_eq!(engine.annotations()[0].radius(), Some(0.0));
}

#[test]
fn test_pan_drag_moves_viewport_by_pointer_delta() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();
    engine.set_tool(MapTool::Pan);

    engine.pointer_down(ScreenPos::new(200.0, 100.0), &s);
    assert!(engine.is_panning());
    engine.pointer_move(ScreenPos::new(230.0, 90.0), &s, &mut vp);
    engine.pointer_move(ScreenPos::new(240.0, 120.0), &s, &mut vp);
    assert_eq!(engine.pointer_up(None, &s), PointerOutcome::PanEnded);

    assert_abs_diff_eq!(vp.pan_x(), 40.0);
    assert_abs_diff_eq!(vp.pan_y(), 20.0);
    assert_eq!(engine.tool(), MapTool::Pan);
    assert!(engine.annotations().is_empty());
}

#[test]
fn test_select_tool_ignores_gestures() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();

    engine.pointer_down(at(10.0, 10.0), &s);
    engine.pointer_move(at(50.0, 50.0), &s, &mut vp);
    assert_eq!(engine.interaction(), &Interaction::Idle);
    assert_eq!(engine.pointer_up(None, &s), PointerOutcome::Nothing);
    assert!(vp.is_initial());
}

#[test]
fn test_leave_commits_by_default() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();
    assert_eq!(engine.leave_policy(), LeavePolicy::Commit);
    engine.set_tool(MapTool::DrawRectangle);

    engine.pointer_down(at(10.0, 10.0), &s);
    engine.pointer_move(at(30.0, 40.0), &s, &mut vp);
    let outcome = engine.pointer_leave(None, &s);

    assert!(matches!(outcome, PointerOutcome::Committed(_)));
    let b = engine.annotations()[0].bounding_box();
    assert_abs_diff_eq!(b.width, 20.0, epsilon = 1e-4);
    assert_abs_diff_eq!(b.height, 30.0, epsilon = 1e-4);
}

#[test]
fn test_leave_discards_under_discard_policy() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::new(LeavePolicy::Discard);
    engine.set_tool(MapTool::DrawCircle);

    engine.pointer_down(at(10.0, 10.0), &s);
    engine.pointer_move(at(30.0, 40.0), &s, &mut vp);
    assert_eq!(engine.pointer_leave(None, &s), PointerOutcome::Discarded);

    assert!(engine.annotations().is_empty());
    assert!(!engine.is_drawing());
    assert_eq!(engine.tool(), MapTool::DrawCircle);
}

#[test]
fn test_clear_empties_list_and_aborts_draft() {
    let s = surface();
    let mut vp = Viewport::new();
    let mut engine = DrawingEngine::default();

    for i in 0..3 {
        engine.set_tool(MapTool::DrawCircle);
        let base = 10.0 + i as f32 * 20.0;
        engine.pointer_down(at(base, base), &s);
        engine.pointer_up(Some(at(base + 5.0, base)), &s);
    }
    engine.set_tool(MapTool::DrawRectangle);
    engine.pointer_down(at(80.0, 80.0), &s);
    engine.pointer_move(at(90.0, 90.0), &s, &mut vp);
    assert_eq!(engine.annotations().len(), 3);
    assert!(engine.is_drawing());

    engine.clear();
    assert!(engine.annotations().is_empty());
    assert!(engine.draft().is_none());

    // The aborted draft must not resurface on the next pointer-up.
    assert_eq!(engine.pointer_up(Some(at(95.0, 95.0)), &s), PointerOutcome::Nothing);
    assert!(engine.annotations().is_empty());

    // Clearing an empty engine is fine too.
    engine.clear();
    assert!(engine.annotations().is_empty());
}

#[test]
fn test_remove_single_annotation() {
    let s = surface();
    let mut engine = DrawingEngine::default();
    for _ in 0..2 {
        engine.set_tool(MapTool::DrawCircle);
        engine.pointer_down(at(50.0, 50.0), &s);
        engine.pointer_up(Some(at(55.0, 50.0)), &s);
    }
    let ids: Vec<_> = engine.annotations().iter().map(|a| a.id().to_string()).collect();
    assert_eq!(ids, ["shape-1", "shape-2"]);

    assert!(engine.remove("shape-1"));
    assert!(!engine.remove("shape-1"));
    assert!(!engine.remove("shape-99"));
    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].id(), "shape-2");
}

#[test]
fn test_tool_cursor_hints() {
    let hints: Vec<_> = MapTool::ALL.iter().map(|t| t.cursor()).collect();
    assert_eq!(
        hints,
        [
            CursorHint::Default,
            CursorHint::Grab,
            CursorHint::Crosshair,
            CursorHint::Crosshair
        ]
    );
}
