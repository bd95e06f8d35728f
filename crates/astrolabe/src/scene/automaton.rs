use log::debug;

use astrolabe_core::{
    color::Color,
    draw::{
        Arc, Arrow, Circle, Directive, Label, NodeStyle, RenderLayer, Scene, StrokeDefinition,
        Text, TextAnchor,
    },
    geometry::Point,
    identifier::StateId,
};

use crate::{
    layout::LayoutPosition,
    model::{Automaton, MergedEdge},
    scene::{Header, SceneError, SceneStyle, StateCategory, summary_box},
};

/// Pixels per layout unit are multiplied by this factor, since automaton
/// layouts are normalized to `[-1, 1]`.
const ZOOM: f32 = 3.0;

// Geometry in normalized layout units.
const NODE_RADIUS: f32 = 0.18;
const RING_RADIUS: f32 = 0.22;
const LOOP_OFFSET: f32 = 0.15;
const LOOP_RADIUS: f32 = 0.1;
const ARC_RATIO: f32 = 0.1;
const START_ARROW_LENGTH: f32 = 0.4;
const START_CAPTION_GAP: f32 = 0.1;
const MARGIN: f32 = 0.5;

/// Gap in pixels between a self-loop and its label frame.
const LOOP_LABEL_GAP: f32 = 5.0;

const TITLE: &str = "DFA (Deterministic Finite Automaton)";

/// Builds the scene of a laid-out automaton.
///
/// # Errors
///
/// Returns [`SceneError::NoStates`] for an automaton without states and
/// [`SceneError::MissingStart`] when no start state is set.
pub fn automaton_scene(
    automaton: &Automaton,
    positions: &LayoutPosition<StateId>,
    style: &SceneStyle,
) -> Result<Scene, SceneError> {
    if automaton.is_empty() {
        return Err(SceneError::NoStates);
    }
    let start = automaton.start().ok_or(SceneError::MissingStart)?;

    let builder = Builder {
        automaton,
        positions,
        style,
        scale: style.unit() * ZOOM,
    };
    let mut scene = Scene::new(style.background());

    for edge in automaton.edges() {
        if edge.is_self_loop() {
            builder.push_self_loop(&mut scene, edge);
        } else {
            builder.push_edge(&mut scene, edge);
        }
    }
    for state in automaton.states() {
        builder.push_state(&mut scene, state.id());
    }
    builder.push_start_indicator(&mut scene, start);

    let summary = vec![
        format!("Total States: {}", automaton.len()),
        format!("Accepting States: {}", automaton.accepting_ids().len()),
        format!("Transitions: {}", automaton.transitions().len()),
    ];
    Header {
        title: TITLE.to_string(),
        title_text: style.text(16.0, true),
        summary: Some(summary_box(summary, style.text(10.0, false))),
        legend: StateCategory::ALL
            .iter()
            .map(|category| (style.palette().state(*category), category.legend_label()))
            .collect(),
        legend_text: style.text(10.0, false),
    }
    .place(&mut scene);

    scene.fit_viewport(MARGIN * builder.scale);
    debug!(
        states = automaton.len(),
        edges = automaton.edges().len(),
        directives = scene.items().len();
        "Automaton scene built"
    );
    Ok(scene)
}

struct Builder<'a> {
    automaton: &'a Automaton,
    positions: &'a LayoutPosition<StateId>,
    style: &'a SceneStyle,
    scale: f32,
}

impl Builder<'_> {
    fn center(&self, id: StateId) -> Point {
        self.positions
            .get(&id)
            .copied()
            .unwrap_or_default()
            .scale(self.scale)
    }

    fn is_accepting(&self, id: StateId) -> bool {
        self.automaton
            .state(id)
            .is_some_and(|state| state.is_accepting())
    }

    fn node_style(&self, id: StateId) -> NodeStyle {
        let category = StateCategory::classify(self.automaton.is_start(id), self.is_accepting(id));
        self.style.palette().state(category)
    }

    /// Radius of the outermost circle drawn for a state.
    fn outer_radius(&self, id: StateId) -> f32 {
        let radius = if self.is_accepting(id) {
            RING_RADIUS
        } else {
            NODE_RADIUS
        };
        radius * self.scale
    }

    fn edge_label(&self, position: Point, content: String) -> Label {
        Label::new(position, content, self.style.text(9.0, false)).with_frame(label_frame())
    }

    fn push_edge(&self, scene: &mut Scene, edge: &MergedEdge) {
        let from_center = self.center(edge.from());
        let to_center = self.center(edge.to());
        let direction = to_center.sub_point(from_center).normalize();

        let from = from_center.add_point(direction.scale(self.outer_radius(edge.from())));
        let to = to_center.sub_point(direction.scale(self.outer_radius(edge.to())));
        let control = from
            .midpoint(to)
            .add_point(to.sub_point(from).perpendicular().scale(ARC_RATIO));

        scene.push(
            RenderLayer::Edge,
            Directive::Arrow(Arrow {
                from,
                control,
                to,
                stroke: StrokeDefinition::solid(Color::default(), 1.5),
            }),
        );
        scene.push(
            RenderLayer::Label,
            Directive::Text(self.edge_label(from_center.midpoint(to_center), edge.label().to_string())),
        );
    }

    /// A dashed loop open towards the node, with its label above it.
    fn push_self_loop(&self, scene: &mut Scene, edge: &MergedEdge) {
        let center = self.center(edge.from());
        let radius = LOOP_RADIUS * self.scale;
        let loop_center = center.with_y(center.y() - LOOP_OFFSET * self.scale);

        scene.push(
            RenderLayer::Edge,
            Directive::Arc(Arc {
                center: loop_center,
                radius,
                start_angle: 135.0,
                sweep: 270.0,
                stroke: StrokeDefinition::dashed(Color::default(), 1.5),
            }),
        );

        let label = self.edge_label(Point::default(), edge.label().to_string());
        let height = Text::new(&label.text, &label.content)
            .calculate_size()
            .height();
        let label_y = loop_center.y() - radius - LOOP_LABEL_GAP - height / 2.0;
        scene.push(
            RenderLayer::Label,
            Directive::Text(Label {
                position: loop_center.with_y(label_y),
                ..label
            }),
        );
    }

    fn push_state(&self, scene: &mut Scene, id: StateId) {
        let center = self.center(id);
        let style = self.node_style(id);

        if self.is_accepting(id) {
            scene.push(
                RenderLayer::Node,
                Directive::Circle(Circle {
                    center,
                    radius: RING_RADIUS * self.scale,
                    fill: None,
                    stroke: StrokeDefinition::solid(style.outline, 2.5),
                }),
            );
        }
        scene.push(
            RenderLayer::Node,
            Directive::Circle(Circle {
                center,
                radius: NODE_RADIUS * self.scale,
                fill: Some(style.fill),
                stroke: StrokeDefinition::solid(style.outline, 2.0),
            }),
        );
        scene.push(
            RenderLayer::Label,
            Directive::Text(Label::new(
                center,
                id.to_string(),
                self.style.text(11.0, true),
            )),
        );
    }

    /// A short arrow from the left into the start state, captioned "Start".
    fn push_start_indicator(&self, scene: &mut Scene, start: StateId) {
        let center = self.center(start);
        let tail = center.with_x(center.x() - START_ARROW_LENGTH * self.scale);
        let head = center.with_x(center.x() - self.outer_radius(start));

        scene.push(
            RenderLayer::Edge,
            Directive::Arrow(Arrow {
                from: tail,
                control: tail.midpoint(head),
                to: head,
                stroke: StrokeDefinition::solid(self.node_style(start).outline, 2.5),
            }),
        );

        let text = self.style.text(10.0, true);
        let width = Text::new(&text, "Start").calculate_size().width();
        let caption_end = tail.x() - START_CAPTION_GAP * self.scale;
        scene.push(
            RenderLayer::Label,
            Directive::Text(
                Label::new(tail.with_x(caption_end - width), "Start", text)
                    .with_anchor(TextAnchor::Start),
            ),
        );
    }
}

/// White, slightly translucent box with a gray border.
fn label_frame() -> NodeStyle {
    NodeStyle::new(
        Color::new("white")
            .expect("white is a valid color")
            .with_alpha(0.8),
        Color::new("gray").expect("gray is a valid color"),
    )
}
