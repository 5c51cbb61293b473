use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) fn category_color(category: &str) -> Color32 {
    match category {
        "core" => Color32::from_rgb(0x2c, 0x2c, 0x2c),
        "psychology" => Color32::from_rgb(0x10, 0xb9, 0x81),
        "technology" => Color32::from_rgb(0x3b, 0x82, 0xf6),
        "philosophy" => Color32::from_rgb(0x66, 0x66, 0x66),
        "mathematics" => Color32::from_rgb(0x88, 0x88, 0x88),
        _ => Color32::from_rgb(0xa8, 0xa2, 0x9e),
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 248));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 60, 60, 16));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            grid_stroke,
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            grid_stroke,
        );
        y += step;
    }
}

pub(super) fn world_to_screen(
    rect: Rect,
    pan: Vec2,
    zoom: f32,
    world_center: Vec2,
    world: Vec2,
) -> Pos2 {
    rect.center() + pan + ((world - world_center) * zoom)
}

pub(super) fn screen_to_world(
    rect: Rect,
    pan: Vec2,
    zoom: f32,
    world_center: Vec2,
    screen: Pos2,
) -> Vec2 {
    ((screen - rect.center() - pan) / zoom) + world_center
}

// Rendered radius tracks sqrt(value / 2) in world units.
pub(super) fn node_screen_radius(value: f32, zoom: f32) -> f32 {
    ((value.max(0.0) * 0.5).sqrt() * zoom).clamp(2.5, 46.0)
}

pub(super) fn edge_stroke_width(weight: f32, zoom: f32) -> f32 {
    (weight.max(0.0).sqrt() * 2.0 * zoom).clamp(0.5, 6.0)
}
