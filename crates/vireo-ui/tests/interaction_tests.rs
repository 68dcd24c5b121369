//! End-to-end interaction tests: scripted input routed through a
//! `GuiContext` into real widgets, observed through their callbacks.

use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{InputEvent, KeyCode, Modifiers};
use vireo_test_utils::{CallRecorder, EventScript};
use vireo_ui::{
    Dialog, DialogPart, DialogResult, GuiContext, ItemId, ListBox, Menu, Orientation, Page,
    PropertyGrid, PropertyValue, ScrollBar, SelectionMode, Slider, TabControl, Toolbar, TreeView,
    ViewportId,
};

fn run(ui: &mut GuiContext, events: Vec<InputEvent>) {
    for event in &events {
        ui.handle_event(ViewportId::MAIN, event);
    }
}

fn click_at(ui: &mut GuiContext, point: Vec2) {
    run(ui, EventScript::new().click(point.x, point.y).build());
}

#[test]
fn test_slider_drag_reports_values() {
    let changes = CallRecorder::new();
    let mut ui = GuiContext::new();
    // Thumb 12 px wide: the thumb center travels from x=6 to x=106.
    let slider = ui.add_root(
        Slider::new(0.0, 100.0)
            .with_bounds(Rect::new(0.0, 0.0, 112.0, 20.0))
            .on_change(changes.sink()),
    );

    run(
        &mut ui,
        EventScript::new()
            .press(56.0, 10.0)
            .move_to(81.0, 10.0)
            .move_to(500.0, 10.0)
            .release(500.0, 10.0)
            .build(),
    );

    assert_eq!(changes.calls(), vec![50.0, 75.0, 100.0]);
    assert_eq!(ui.get::<Slider>(slider).map(|s| s.value()), Some(100.0));
    assert!(!ui.get::<Slider>(slider).is_some_and(|s| s.is_dragging()));

    // Programmatic changes stay silent.
    ui.with_widget::<Slider, _>(slider, |s| s.set_value(10.0));
    assert_eq!(changes.len(), 3);
}

#[test]
fn test_slider_keyboard_after_click_focus() {
    let changes = CallRecorder::new();
    let mut ui = GuiContext::new();
    let slider = ui.add_root(
        Slider::new(0.0, 10.0)
            .with_step(1.0)
            .with_bounds(Rect::new(0.0, 0.0, 112.0, 20.0))
            .on_change(changes.sink()),
    );
    click_at(&mut ui, Vec2::new(6.0, 10.0));
    assert_eq!(ui.focused(), Some(slider));

    run(&mut ui, EventScript::new().key(KeyCode::Right).key(KeyCode::Right).build());
    assert_eq!(ui.get::<Slider>(slider).map(|s| s.value()), Some(2.0));
    assert_eq!(changes.calls(), vec![1.0, 2.0]);
}

#[test]
fn test_scrollbar_page_and_drag() {
    let changes = CallRecorder::new();
    let mut ui = GuiContext::new();
    // Thumb covers half the track: y in [0, 50).
    let bar = ui.add_root(
        ScrollBar::new(Orientation::Vertical)
            .with_bounds(Rect::new(0.0, 0.0, 10.0, 100.0))
            .with_range(0.0, 100.0)
            .with_page_size(100.0)
            .on_change(changes.sink()),
    );

    click_at(&mut ui, Vec2::new(5.0, 80.0));
    assert_eq!(ui.get::<ScrollBar>(bar).map(|b| b.get_value()), Some(100.0));

    run(
        &mut ui,
        EventScript::new()
            .drag(Vec2::new(5.0, 75.0), Vec2::new(5.0, 25.0), 1)
            .build(),
    );
    assert_eq!(ui.get::<ScrollBar>(bar).map(|b| b.get_value()), Some(0.0));
    assert_eq!(changes.calls(), vec![100.0, 0.0]);
}

#[test]
fn test_list_box_multi_selection_with_modifiers() {
    let selections: CallRecorder<Vec<ItemId>> = CallRecorder::new();
    let mut ui = GuiContext::new();
    let list = ui.add_root(
        ListBox::new()
            .with_bounds(Rect::new(0.0, 0.0, 200.0, 120.0))
            .with_selection_mode(SelectionMode::Multi)
            .with_items(["a", "b", "c", "d"])
            .on_selection_changed(selections.sink()),
    );
    let (ids, rects): (Vec<ItemId>, Vec<Rect>) = {
        let lb = ui.get::<ListBox>(list).unwrap();
        let ids = lb.item_ids();
        let rects = ids.iter().map(|id| lb.item_rect(*id).unwrap()).collect();
        (ids, rects)
    };

    click_at(&mut ui, rects[0].center());
    run(&mut ui, EventScript::new().with_modifiers(Modifiers::SHIFT).build());
    click_at(&mut ui, rects[2].center());
    run(&mut ui, EventScript::new().with_modifiers(Modifiers::CONTROL).build());
    click_at(&mut ui, rects[1].center());

    assert_eq!(
        selections.calls(),
        vec![
            vec![ids[0]],
            vec![ids[0], ids[1], ids[2]],
            vec![ids[0], ids[2]],
        ]
    );
    assert_eq!(
        ui.get::<ListBox>(list).map(|lb| lb.selected_items()),
        Some(vec![ids[0], ids[2]])
    );
}

#[test]
fn test_tree_view_toggle_and_select() {
    let expanded = CallRecorder::new();
    let selected = CallRecorder::new();
    let mut ui = GuiContext::new();
    let tree = ui.add_root(
        TreeView::new()
            .with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0))
            .on_expanded_changed(expanded.sink())
            .on_selection_changed(selected.sink()),
    );
    let (root, child) = ui
        .with_widget::<TreeView, _>(tree, |t| {
            let root = t.add_node(None, "root").unwrap();
            let child = t.add_node(Some(root), "child").unwrap();
            t.collapse(root);
            (root, child)
        })
        .unwrap();

    // Rows are 22 px high below a 2 px padding; the toggle is the first
    // 16 px of an unindented row.
    click_at(&mut ui, Vec2::new(10.0, 13.0));
    assert!(ui.get::<TreeView>(tree).is_some_and(|t| t.is_expanded(root)));
    assert_eq!(expanded.calls(), vec![(root, true)]);
    assert!(selected.is_empty());

    click_at(&mut ui, Vec2::new(100.0, 35.0));
    assert_eq!(selected.calls(), vec![Some(child)]);

    // Left on a leaf moves to its parent; Left again collapses it.
    run(&mut ui, EventScript::new().key(KeyCode::Left).key(KeyCode::Left).build());
    assert_eq!(selected.last(), Some(Some(root)));
    assert_eq!(expanded.last(), Some((root, false)));
}

#[test]
fn test_toolbar_toggle_click() {
    let clicks = CallRecorder::new();
    let mut ui = GuiContext::new();
    let toolbar = ui.add_root(
        Toolbar::new(Orientation::Horizontal)
            .with_bounds(Rect::new(0.0, 0.0, 300.0, 36.0))
            .on_item_clicked(clicks.sink()),
    );
    let (save, bold) = ui
        .with_widget::<Toolbar, _>(toolbar, |t| {
            let save = t.add_button("Save");
            t.add_separator();
            (save, t.add_toggle("Bold", false))
        })
        .unwrap();
    let bold_rect = ui.get::<Toolbar>(toolbar).and_then(|t| t.item_rect(bold)).unwrap();
    let save_rect = ui.get::<Toolbar>(toolbar).and_then(|t| t.item_rect(save)).unwrap();

    click_at(&mut ui, bold_rect.center());
    assert!(ui.get::<Toolbar>(toolbar).is_some_and(|t| t.is_item_checked(bold)));

    // Pressing one item and releasing over another clicks nothing.
    run(
        &mut ui,
        EventScript::new()
            .press(save_rect.center().x, save_rect.center().y)
            .release(bold_rect.center().x, bold_rect.center().y)
            .build(),
    );
    assert_eq!(clicks.calls(), vec![bold]);
}

#[test]
fn test_menu_item_activation_closes() {
    let activated = CallRecorder::new();
    let closed = CallRecorder::<()>::new();
    let mut ui = GuiContext::new();
    let menu = ui.add_root(
        Menu::new()
            .on_item_activated(activated.sink())
            .on_close(closed.unit_sink()),
    );
    let (open, wrap) = ui
        .with_widget::<Menu, _>(menu, |m| {
            let open = m.add_item("Open");
            m.add_separator();
            let wrap = m.add_checkbox("Word wrap", false);
            m.show_at(Vec2::new(20.0, 20.0));
            (open, wrap)
        })
        .unwrap();
    let wrap_rect = ui.get::<Menu>(menu).and_then(|m| m.item_rect(wrap)).unwrap();

    click_at(&mut ui, wrap_rect.center());
    assert_eq!(activated.calls(), vec![wrap]);
    assert_eq!(closed.len(), 1);
    let m = ui.get::<Menu>(menu).unwrap();
    assert!(!m.is_open());
    assert!(m.is_item_checked(wrap));
    assert!(!m.is_item_checked(open));
    assert_eq!(ui.focused(), None);
}

#[test]
fn test_dialog_drag_moves_children_and_button_closes() {
    let results = CallRecorder::new();
    let mut ui = GuiContext::new();
    let dialog = ui.add_root(
        Dialog::new("Settings")
            .with_bounds(Rect::new(100.0, 100.0, 300.0, 200.0))
            .on_close(results.sink()),
    );
    let slider = ui
        .add_child(dialog, Slider::new(0.0, 1.0).with_bounds(Rect::new(120.0, 150.0, 100.0, 20.0)))
        .unwrap();
    let ok = ui
        .with_widget::<Dialog, _>(dialog, |d| {
            let ok = d.add_button("OK", DialogResult::Ok);
            d.open();
            ok
        })
        .unwrap();

    let title = ui.get::<Dialog>(dialog).map(|d| d.title_bar_rect()).unwrap();
    let grab = Vec2::new(title.x + 20.0, title.center().y);
    run(
        &mut ui,
        EventScript::new()
            .drag(grab, grab + Vec2::new(30.0, -40.0), 3)
            .build(),
    );
    assert_eq!(
        ui.widget(dialog).map(|w| w.base().bounds()),
        Some(Rect::new(130.0, 60.0, 300.0, 200.0))
    );
    assert_eq!(
        ui.widget(slider).map(|w| w.base().bounds()),
        Some(Rect::new(150.0, 110.0, 100.0, 20.0))
    );

    let ok_rect = ui.get::<Dialog>(dialog).and_then(|d| d.button_rect(ok)).unwrap();
    assert_eq!(
        ui.get::<Dialog>(dialog).and_then(|d| d.part_at(ok_rect.center())),
        Some(DialogPart::Button(ok))
    );
    click_at(&mut ui, ok_rect.center());
    assert_eq!(results.calls(), vec![DialogResult::Ok]);
    assert!(!ui.is_visible(slider));
    assert_eq!(ui.modal_root(ViewportId::MAIN), None);
}

#[test]
fn test_property_grid_text_edit_commits_on_enter() {
    let changes = CallRecorder::new();
    let mut ui = GuiContext::new();
    let sink = changes.clone();
    let grid = ui.add_root(
        PropertyGrid::new()
            .with_bounds(Rect::new(0.0, 0.0, 300.0, 200.0))
            .on_property_changed(move |id, value| sink.record((id, value.clone()))),
    );
    let (count, visible) = ui
        .with_widget::<PropertyGrid, _>(grid, |g| {
            let general = g.add_category("General");
            let count = g.add_property(general, "Count", PropertyValue::Int(5)).unwrap();
            let visible = g.add_property(general, "Visible", PropertyValue::Bool(true)).unwrap();
            (count, visible)
        })
        .unwrap();
    let count_value = ui.get::<PropertyGrid>(grid).and_then(|g| g.value_rect(count)).unwrap();
    let visible_value = ui.get::<PropertyGrid>(grid).and_then(|g| g.value_rect(visible)).unwrap();

    click_at(&mut ui, count_value.center());
    assert_eq!(ui.focused(), Some(grid));
    assert_eq!(ui.get::<PropertyGrid>(grid).and_then(|g| g.edit_buffer()), Some("5"));

    run(
        &mut ui,
        EventScript::new()
            .key(KeyCode::Backspace)
            .text("42")
            .key(KeyCode::Enter)
            .build(),
    );
    assert_eq!(changes.calls(), vec![(count, PropertyValue::Int(42))]);

    // Bad input is rejected and the old value kept.
    click_at(&mut ui, count_value.center());
    run(
        &mut ui,
        EventScript::new().text("x").key(KeyCode::Enter).build(),
    );
    assert_eq!(
        ui.get::<PropertyGrid>(grid).and_then(|g| g.get_property_value(count).cloned()),
        Some(PropertyValue::Int(42))
    );
    assert_eq!(changes.len(), 1);

    // Clicking a bool value flips it.
    click_at(&mut ui, visible_value.center());
    assert_eq!(changes.last(), Some((visible, PropertyValue::Bool(false))));
}

#[test]
fn test_tab_control_click_switches_pages() {
    let selected = CallRecorder::new();
    let mut ui = GuiContext::new();
    let tabs = ui.add_root(
        TabControl::new()
            .with_bounds(Rect::new(0.0, 0.0, 400.0, 300.0))
            .on_tab_selected(selected.sink()),
    );
    let content = ui.get::<TabControl>(tabs).map(|t| t.content_rect()).unwrap();
    let first = ui.add_child(tabs, Page::new("").with_bounds(content)).unwrap();
    let second = ui.add_child(tabs, Page::new("").with_bounds(content)).unwrap();
    let (_, two) = ui
        .with_widget::<TabControl, _>(tabs, |t| {
            (t.add_tab_with_page("One", first), t.add_tab_with_page("Two", second))
        })
        .unwrap();

    let two_rect = ui.get::<TabControl>(tabs).and_then(|t| t.tab_rect(two)).unwrap();
    click_at(&mut ui, Vec2::new(two_rect.x + 10.0, two_rect.center().y));
    assert_eq!(selected.calls(), vec![two]);
    assert!(!ui.is_visible(first));
    assert!(ui.is_visible(second));

    let hit = ui.hit_test(ViewportId::MAIN, content.center());
    assert_eq!(hit, Some(second));
}
