use log::debug;

use astrolabe_core::{
    color::Color,
    draw::{Circle, Directive, Label, Line, RenderLayer, Scene, StrokeDefinition},
    geometry::Point,
};

use crate::{
    layout::tree::TreeLayout,
    model::SyntaxTree,
    scene::{Header, SceneError, SceneStyle, TreeNodeCategory},
};

const NODE_RADIUS: f32 = 0.3;
const NODE_OUTLINE_WIDTH: f32 = 2.5;
const EDGE_WIDTH: f32 = 2.0;
/// Margin around the drawing, in layout units.
const MARGIN: f32 = 1.0;

/// Builds the scene of a laid-out syntax tree.
///
/// Edges are straight parent-to-child lines drawn under the nodes. Operators
/// and operands are colored by category.
///
/// # Errors
///
/// Returns [`SceneError::MissingRoot`] for an empty tree.
pub fn tree_scene(
    tree: &SyntaxTree,
    layout: &TreeLayout,
    style: &SceneStyle,
) -> Result<Scene, SceneError> {
    if tree.root().is_none() {
        return Err(SceneError::MissingRoot);
    }

    let unit = style.unit();
    let to_scene = |point: Point| point.scale(unit);
    let mut scene = Scene::new(style.background());

    let edge_stroke = StrokeDefinition::solid(Color::default(), EDGE_WIDTH);
    for (parent, child) in tree.edges() {
        let (Some(from), Some(to)) = (layout.position(parent.id()), layout.position(child.id()))
        else {
            continue;
        };
        scene.push(
            RenderLayer::Edge,
            Directive::Line(Line {
                from: to_scene(from),
                to: to_scene(to),
                stroke: edge_stroke.clone(),
            }),
        );
    }

    let value_text = style.text(14.0, true);
    for node in tree.nodes() {
        let Some(position) = layout.position(node.id()) else {
            continue;
        };
        let center = to_scene(position);
        let node_style = style
            .palette()
            .tree_node(TreeNodeCategory::classify(node.kind()));

        scene.push(
            RenderLayer::Node,
            Directive::Circle(Circle {
                center,
                radius: NODE_RADIUS * unit,
                fill: Some(node_style.fill),
                stroke: StrokeDefinition::solid(node_style.outline, NODE_OUTLINE_WIDTH),
            }),
        );
        scene.push(
            RenderLayer::Label,
            Directive::Text(Label::new(
                center,
                node.value().to_string(),
                value_text.clone(),
            )),
        );
    }

    let title = format!(
        "Syntax Tree\nOriginal: {}\nWith Concat: {}\nPostfix: {}",
        tree.original_regex(),
        tree.regex_with_concat(),
        tree.postfix()
    );
    Header {
        title,
        title_text: style.text(12.0, true),
        summary: None,
        legend: TreeNodeCategory::ALL
            .iter()
            .map(|category| (style.palette().tree_node(*category), category.legend_label()))
            .collect(),
        legend_text: style.text(10.0, false),
    }
    .place(&mut scene);

    scene.fit_viewport(MARGIN * unit);
    debug!(nodes = tree.len(), directives = scene.items().len(); "Syntax tree scene built");
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use astrolabe_core::draw::Drawable;

    use super::*;
    use crate::{
        config::TreeLayoutConfig,
        document::{RawTreeNode, SyntaxTreeDocument},
        layout::tree::layout_tree,
    };

    fn sample_tree() -> SyntaxTree {
        SyntaxTree::from_document(SyntaxTreeDocument {
            root: Some(RawTreeNode::branch(
                0,
                "|",
                Some(RawTreeNode::leaf(1, "a")),
                Some(RawTreeNode::branch(
                    2,
                    "*",
                    Some(RawTreeNode::leaf(3, "ε")),
                    None,
                )),
            )),
            original_regex: Some("a|()*".to_string()),
            regex_with_concat: None,
            postfix: Some("aε*|".to_string()),
        })
        .unwrap()
    }

    fn build(tree: &SyntaxTree) -> Result<Scene, SceneError> {
        let layout = layout_tree(tree, &TreeLayoutConfig::default()).unwrap();
        tree_scene(tree, &layout, &SceneStyle::default())
    }

    #[test]
    fn test_missing_root() {
        let tree = SyntaxTree::from_document(SyntaxTreeDocument::default()).unwrap();
        assert_eq!(build(&tree).unwrap_err(), SceneError::MissingRoot);
    }

    #[test]
    fn test_one_line_per_edge_and_circle_per_node() {
        let scene = build(&sample_tree()).unwrap();

        let lines = scene
            .directives()
            .filter(|d| matches!(d, Directive::Line(_)))
            .count();
        let circles = scene
            .directives()
            .filter(|d| matches!(d, Directive::Circle(_)))
            .count();
        assert_eq!(lines, 3);
        assert_eq!(circles, 4);
    }

    #[test]
    fn test_edges_below_nodes() {
        let scene = build(&sample_tree()).unwrap();
        assert!(
            scene
                .items()
                .iter()
                .filter(|item| matches!(item.directive(), Directive::Line(_)))
                .all(|item| item.layer() < RenderLayer::Node)
        );
    }

    #[test]
    fn test_nodes_colored_by_category() {
        let style = SceneStyle::default();
        let scene = build(&sample_tree()).unwrap();
        let operator = style.palette().tree_node(TreeNodeCategory::Operator);
        let operand = style.palette().tree_node(TreeNodeCategory::Operand);

        let fills: Vec<Color> = scene
            .directives()
            .filter_map(|d| match d {
                Directive::Circle(circle) => circle.fill,
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![operator.fill, operand.fill, operator.fill, operand.fill]);
    }

    #[test]
    fn test_title_carries_display_strings() {
        let scene = build(&sample_tree()).unwrap();
        let title = scene
            .directives()
            .find_map(|d| match d {
                Directive::Text(label) if label.content.starts_with("Syntax Tree") => Some(label),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            title.content,
            "Syntax Tree\nOriginal: a|()*\nWith Concat: N/A\nPostfix: aε*|"
        );
    }

    #[test]
    fn test_viewport_contains_everything() {
        let scene = build(&sample_tree()).unwrap();
        let viewport = scene.viewport();
        for directive in scene.directives() {
            assert!(viewport.contains_bounds(directive.bounds()));
        }
    }
}
