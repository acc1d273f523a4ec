use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::color::{coolwarm, label_color};
use crate::view::correlation::CorrelationMatrix;

const CELL_SIZE: f32 = 90.0;
const LABEL_WIDTH: f32 = 110.0;
const LABEL_HEIGHT: f32 = 24.0;

/// Text drawn in a heatmap cell.
pub fn annotation(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Draw the matrix as annotated coloured cells with field labels.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.fields.len();
    let grid = CELL_SIZE * n as f32;
    let size = Vec2::new(LABEL_WIDTH + grid, LABEL_HEIGHT + grid);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    let text_color = ui.visuals().text_color();
    let label_font = FontId::proportional(13.0);
    let value_font = FontId::proportional(15.0);

    for (j, field) in matrix.fields.iter().enumerate() {
        painter.text(
            Pos2::new(
                origin.x + LABEL_WIDTH + CELL_SIZE * (j as f32 + 0.5),
                origin.y + LABEL_HEIGHT * 0.5,
            ),
            Align2::CENTER_CENTER,
            field.label(),
            label_font.clone(),
            text_color,
        );
    }

    for (i, field) in matrix.fields.iter().enumerate() {
        let row_top = origin.y + LABEL_HEIGHT + CELL_SIZE * i as f32;
        painter.text(
            Pos2::new(origin.x + LABEL_WIDTH - 8.0, row_top + CELL_SIZE * 0.5),
            Align2::RIGHT_CENTER,
            field.label(),
            label_font.clone(),
            text_color,
        );

        for (j, other) in matrix.fields.iter().enumerate() {
            let value = matrix.get(*field, *other);
            let cell = Rect::from_min_size(
                Pos2::new(origin.x + LABEL_WIDTH + CELL_SIZE * j as f32, row_top),
                Vec2::splat(CELL_SIZE),
            );
            painter.rect_filled(cell, 0.0, coolwarm(value));
            painter.rect_stroke(
                cell,
                0.0,
                Stroke::new(1.0, ui.visuals().window_stroke.color),
                egui::StrokeKind::Inside,
            );
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                annotation(value),
                value_font.clone(),
                label_color(value),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_use_two_decimals() {
        assert_eq!(annotation(1.0), "1.00");
        assert_eq!(annotation(-0.456), "-0.46");
        assert_eq!(annotation(f64::NAN), "NaN");
    }
}
