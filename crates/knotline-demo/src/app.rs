//! Demo application state, messages and view

use iced::widget::{button, checkbox, column, container, row, text};
use iced::{Element, Length, Task, Theme};
use knotline_core::config::{
    default_config_path, default_preset_dir, load_config, save_config, WidgetConfig,
};
use knotline_core::transfer_function::{load_preset, save_preset, TransferFunctionPreset};
use knotline_core::{ControlPoint, PiecewiseFunction, Rgba, SubPoint};
use knotline_widgets::{
    range_editor, transfer_function_curve, transfer_function_gradient, ControlPointsItem,
    CurveEvent, CurveInput, GradientItem, RangeEditor, RangeEditorEvent, SliderInput,
    SliderStyle,
};
use std::path::PathBuf;

const PRESET_NAME: &str = "demo";

/// Messages handled by [`KnotlineDemo::update`]
#[derive(Debug, Clone)]
pub enum Message {
    RangeInput(SliderInput),
    CurveInput(CurveInput),
    ToggleTracking(bool),
    ResetRange,
    ResetCurve,
    SavePreset,
    LoadPreset,
}

pub struct KnotlineDemo {
    config: WidgetConfig,
    config_path: PathBuf,
    preset_path: PathBuf,
    style: SliderStyle,
    editor: RangeEditor,
    function: PiecewiseFunction,
    gradient: GradientItem,
    control_points: ControlPointsItem,
    /// Last committed range, shown below the editor
    committed: (f64, f64),
    status: String,
}

impl KnotlineDemo {
    pub fn new() -> (Self, Task<Message>) {
        let config_path = default_config_path("widgets.yaml");
        let preset_path = default_preset_dir().join(format!("{}.yaml", PRESET_NAME));
        (Self::with_paths(config_path, preset_path), Task::none())
    }

    /// Build the demo around explicit config and preset locations
    pub fn with_paths(config_path: PathBuf, preset_path: PathBuf) -> Self {
        let config: WidgetConfig = load_config(&config_path);
        log::info!(
            "Loaded config: tracking={}, range {}..{} step {}",
            config.tracking,
            config.range.minimum,
            config.range.maximum,
            config.range.single_step
        );

        let editor = RangeEditor::from_config(&config.range, config.tracking);
        let committed = (editor.minimum_value(), editor.maximum_value());

        let mut function = default_function();
        function.subscribe(|event| log::debug!("Transfer function changed: {:?}", event));

        Self {
            style: SliderStyle::from_config(&config),
            gradient: GradientItem::new(config.fallback_color),
            control_points: ControlPointsItem::new(config.point_size),
            config,
            config_path,
            preset_path,
            editor,
            function,
            committed,
            status: String::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RangeInput(input) => {
                let events = self.editor.handle_input(&input, self.style);
                self.apply_range_events(events);
            }
            Message::CurveInput(input) => {
                match self
                    .control_points
                    .handle_input(&mut self.function, &input)
                {
                    Some(CurveEvent::PointReleased(index)) => {
                        let x = self.function.points().get(index).map(|p| p.x);
                        log::info!("Control point {} released at {:?}", index, x);
                    }
                    Some(event) => log::debug!("Curve: {:?}", event),
                    None => {}
                }
            }
            Message::ToggleTracking(tracking) => {
                self.editor.set_tracking(tracking);
                self.config.tracking = tracking;
                if let Err(e) = save_config(&self.config, &self.config_path) {
                    log::warn!("Failed to save config: {:#}", e);
                    self.status = format!("Could not save settings: {}", e);
                }
            }
            Message::ResetRange => {
                let events = self.editor.reset();
                self.apply_range_events(events);
            }
            Message::ResetCurve => {
                self.replace_function(default_function());
                self.status = String::from("Curve reset");
            }
            Message::SavePreset => {
                let preset = TransferFunctionPreset::from_function(PRESET_NAME, &self.function);
                self.status = match save_preset(&preset, &self.preset_path) {
                    Ok(()) => format!("Saved preset to {}", self.preset_path.display()),
                    Err(e) => {
                        log::warn!("Failed to save preset: {}", e);
                        e.to_string()
                    }
                };
            }
            Message::LoadPreset => {
                self.status = match self.load_preset() {
                    Ok(name) => format!("Loaded preset '{}'", name),
                    Err(e) => {
                        log::warn!("Failed to load preset: {:#}", e);
                        format!("{:#}", e)
                    }
                };
            }
        }
        Task::none()
    }

    fn load_preset(&mut self) -> anyhow::Result<String> {
        let preset = load_preset(&self.preset_path)?;
        self.replace_function(preset.to_function()?);
        Ok(preset.name)
    }

    /// Swap in a new data source; a drag on the old one is dropped
    fn replace_function(&mut self, mut function: PiecewiseFunction) {
        function.subscribe(|event| log::debug!("Transfer function changed: {:?}", event));
        let _ = self.control_points.release();
        self.function = function;
    }

    fn apply_range_events(&mut self, events: Vec<RangeEditorEvent>) {
        for event in events {
            match event {
                RangeEditorEvent::MinimumValueChanged(v) => {
                    log::info!("Range minimum committed: {}", self.editor.format_value(v));
                    self.committed.0 = v;
                }
                RangeEditorEvent::MaximumValueChanged(v) => {
                    log::info!("Range maximum committed: {}", self.editor.format_value(v));
                    self.committed.1 = v;
                }
                RangeEditorEvent::MinimumValueIsChanging(_)
                | RangeEditorEvent::MaximumValueIsChanging(_) => {}
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let heading = |label: &'static str| text(label).size(14);

        let range_controls = row![
            checkbox(self.editor.has_tracking())
                .label("Tracking")
                .on_toggle(Message::ToggleTracking)
                .size(16),
            button(text("Reset range"))
                .on_press(Message::ResetRange)
                .style(button::secondary),
        ]
        .spacing(12);

        let committed = text(format!(
            "Committed: {} .. {}",
            self.editor.format_value(self.committed.0),
            self.editor.format_value(self.committed.1)
        ))
        .size(12);

        let curve_controls = row![
            button(text("Save preset")).on_press(Message::SavePreset),
            button(text("Load preset")).on_press(Message::LoadPreset),
            button(text("Reset curve"))
                .on_press(Message::ResetCurve)
                .style(button::secondary),
        ]
        .spacing(12);

        let content = column![
            heading("Range"),
            range_editor(&self.editor, self.style, Message::RangeInput),
            range_controls,
            committed,
            heading("Transfer function"),
            transfer_function_gradient(&self.function, &self.gradient),
            transfer_function_curve(&self.function, &self.control_points, Message::CurveInput),
            curve_controls,
            text(&self.status).size(12),
        ]
        .spacing(10);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Color ramp over `[0, 255]` using all three segment kinds
fn default_function() -> PiecewiseFunction {
    let mut f = PiecewiseFunction::color((0.0, 255.0));
    f.add_control_point(ControlPoint::plain(0.0, Rgba::new(0.0, 0.2, 1.0, 0.0)));
    f.add_control_point(ControlPoint::bezier(
        96.0,
        Rgba::new(0.0, 0.8, 0.4, 0.4),
        SubPoint::new(128.0, Rgba::new(0.0, 0.8, 0.4, 0.9)),
        SubPoint::new(160.0, Rgba::new(0.0, 0.8, 0.4, 0.6)),
    ));
    f.add_control_point(ControlPoint::non_linear(
        192.0,
        Rgba::new(1.0, 0.6, 0.0, 0.6),
        vec![
            SubPoint::new(192.0, Rgba::new(1.0, 0.6, 0.0, 0.6)),
            SubPoint::new(208.0, Rgba::new(1.0, 0.5, 0.0, 0.3)),
            SubPoint::new(224.0, Rgba::new(1.0, 0.4, 0.0, 0.8)),
        ],
    ));
    f.add_control_point(ControlPoint::plain(255.0, Rgba::new(1.0, 0.0, 0.0, 1.0)));
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Rectangle, Size};
    use knotline_core::TransferFunction;
    use knotline_widgets::{curve_path, CurveInputKind};

    fn demo(dir: &tempfile::TempDir) -> KnotlineDemo {
        KnotlineDemo::with_paths(
            dir.path().join("widgets.yaml"),
            dir.path().join("presets").join("demo.yaml"),
        )
    }

    fn curve_input(kind: CurveInputKind) -> Message {
        Message::CurveInput(CurveInput {
            kind,
            bounds: Size::new(510.0, 160.0),
        })
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = demo(&dir);
        assert!(app.editor.has_tracking());
        assert_eq!(app.committed, (0.0, 99.0));
        assert_eq!(app.function.count(), 4);
    }

    #[test]
    fn test_tracking_toggle_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo(&dir);
        let _ = app.update(Message::ToggleTracking(false));
        assert!(!app.editor.has_tracking());

        let reloaded = demo(&dir);
        assert!(!reloaded.editor.has_tracking());
    }

    #[test]
    fn test_dragging_a_marker_moves_the_point() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo(&dir);
        let rect = Rectangle::new(Point::ORIGIN, Size::new(510.0, 160.0));
        let marker = curve_path(&app.function, rect).markers[1];

        let _ = app.update(curve_input(CurveInputKind::Press(marker)));
        assert_eq!(app.control_points.selected(), Some(1));
        let _ = app.update(curve_input(CurveInputKind::Move(Point::new(
            marker.x + 40.0,
            marker.y,
        ))));
        let _ = app.update(curve_input(CurveInputKind::Release));

        assert!(app.control_points.selected().is_none());
        assert!((app.function.points()[1].x - 116.0).abs() < 1e-3);
    }

    #[test]
    fn test_preset_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo(&dir);
        let _ = app.update(Message::SavePreset);
        assert!(app.status.starts_with("Saved preset"));

        app.function = PiecewiseFunction::color((0.0, 1.0));
        let _ = app.update(Message::LoadPreset);
        assert_eq!(app.status, "Loaded preset 'demo'");
        assert_eq!(app.function.count(), 4);
        assert_eq!(app.function.range(), (0.0, 255.0));
    }

    #[test]
    fn test_missing_preset_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo(&dir);
        let _ = app.update(Message::LoadPreset);
        assert!(!app.status.is_empty());
        assert_eq!(app.function.count(), 4);
    }

    #[test]
    fn test_reset_after_load_and_drag_redraws_the_new_curve() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo(&dir);
        let rect = Rectangle::new(Point::ORIGIN, Size::new(510.0, 160.0));
        let _ = app.update(Message::SavePreset);
        let _ = app.update(Message::LoadPreset);

        let marker = app.control_points.path(&app.function, rect).markers[1];
        let _ = app.update(curve_input(CurveInputKind::Press(marker)));
        for step in 1..=4 {
            let x = marker.x + 10.0 * step as f32;
            let _ = app.update(curve_input(CurveInputKind::Move(Point::new(x, marker.y))));
        }
        let _ = app.update(curve_input(CurveInputKind::Release));
        let dragged = app.control_points.path(&app.function, rect).markers[1];
        assert_eq!(dragged.x, marker.x + 40.0);

        let _ = app.update(Message::ResetCurve);
        let fresh = curve_path(&app.function, rect);
        assert_eq!(app.control_points.path(&app.function, rect).markers, fresh.markers);
        assert_eq!(
            app.gradient.fills(&app.function, rect).to_vec(),
            knotline_widgets::gradient_fills(&app.function, rect, Rgba::BLACK)
        );

        // Presses hit-test against the reset curve
        let _ = app.update(curve_input(CurveInputKind::Press(fresh.markers[1])));
        assert_eq!(app.control_points.selected(), Some(1));
    }
}
