//! SVG rendering surface for expedite widgets
use std::path::Path;
use std::{fmt, io};

use expedite::geom::{self, Transform};
use expedite::render::{self, Surface};
use expedite::{Style, drawing, text};
use svg::Node;
use svg::node::element;

/// Parameters needed for saving a [`drawing::Widget`] as SVG
#[derive(Debug, Clone)]
pub struct DrawingParams {
    pub style: Style,
    pub scale: f32,
}

impl Default for DrawingParams {
    fn default() -> Self {
        Self {
            style: Style::default(),
            scale: 1.0,
        }
    }
}

pub trait SaveSvg {
    /// Draw to a new SVG surface
    fn to_svg(&self, params: &DrawingParams) -> SvgSurface;

    /// Draw and save to `path`
    fn save_svg<P>(&self, path: P, params: &DrawingParams) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        self.to_svg(params).save_svg(path)
    }
}

impl<M> SaveSvg for drawing::Widget<M> {
    fn to_svg(&self, params: &DrawingParams) -> SvgSurface {
        let bounds = self.bounds();
        let width = (bounds.width() * params.scale).ceil() as u32;
        let height = (bounds.height() * params.scale).ceil() as u32;

        let mut surface = SvgSurface::new(width, height);
        self.draw(&mut surface, &params.style);
        surface
    }
}

#[derive(Debug)]
pub struct SvgSurface {
    doc: svg::Document,
    clip_num: u32,
    group_stack: Vec<element::Group>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let doc = svg::Document::new()
            .set("width", width)
            .set("height", height);
        SvgSurface {
            doc,
            clip_num: 0,
            group_stack: vec![],
        }
    }

    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        if !self.group_stack.is_empty() {
            panic!("Unbalanced clip stack");
        }
        svg::save(path, &self.doc)
    }

    pub fn write<W>(&self, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        if !self.group_stack.is_empty() {
            panic!("Unbalanced clip stack");
        }
        svg::write(dest, &self.doc)
    }
}

impl fmt::Display for SvgSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

impl Surface for SvgSurface {
    fn prepare(&mut self, size: geom::Size) {
        self.doc
            .assign("viewBox", (0, 0, size.width(), size.height()));
    }

    fn draw_rect(&mut self, rect: &render::Rect) {
        let mut node = rectangle_node(&rect.rect);
        assign_fill(&mut node, rect.fill.as_ref());
        assign_stroke(&mut node, rect.stroke.as_ref());
        assign_transform(&mut node, rect.transform);
        assign_class(&mut node, rect.class);
        self.append_node(node);
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut node = element::Path::new();
        assign_fill(&mut node, path.fill.as_ref());
        assign_stroke(&mut node, path.stroke.as_ref());
        assign_transform(&mut node, path.transform);
        assign_class(&mut node, path.class);
        node.assign("d", path_data(path.path));
        self.append_node(node);
    }

    fn draw_text(&mut self, text: &render::Text) {
        let mut node = element::Text::new(text.text)
            .set("x", text.origin.x)
            .set("y", text.origin.y);
        assign_font(&mut node, text.font, text.font_size);
        assign_fill(&mut node, Some(&text.fill));
        assign_class(&mut node, text.class);
        self.append_node(node);
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        let clip_id = self.bump_clip_id();
        let clip_id_url = format!("url(#{})", clip_id);
        let mut rect_node = rectangle_node(clip.rect);
        assign_transform(&mut rect_node, clip.transform);
        let node = element::ClipPath::new()
            .set("id", clip_id)
            .add(rect_node);
        self.append_node(node);
        self.group_stack
            .push(element::Group::new().set("clip-path", clip_id_url));
    }

    fn pop_clip(&mut self) {
        let Some(g) = self.group_stack.pop() else {
            panic!("Unbalanced clip stack");
        };
        self.append_node(g);
    }
}

impl SvgSurface {
    fn append_node<T>(&mut self, node: T)
    where
        T: Node,
    {
        match self.group_stack.last_mut() {
            Some(group) => group.append(node),
            None => self.doc.append(node),
        }
    }

    fn bump_clip_id(&mut self) -> String {
        self.clip_num += 1;
        format!("expedite-clip{}", self.clip_num)
    }
}

fn assign_transform<N>(node: &mut N, transform: Option<&geom::Transform>)
where
    N: Node,
{
    if let Some(Transform {
        sx,
        kx,
        ky,
        sy,
        tx,
        ty,
    }) = transform
    {
        node.assign(
            "transform",
            format!("matrix({sx} {ky} {kx} {sy} {tx} {ty})"),
        );
    }
}

fn assign_class<N>(node: &mut N, class: Option<&str>)
where
    N: Node,
{
    if let Some(class) = class {
        node.assign("class", class);
    }
}

fn assign_font<N>(node: &mut N, font: &text::Font, font_size: f32)
where
    N: Node,
{
    node.assign("font-family", font.family().css_name());
    node.assign("font-size", font_size);
    if font.weight() != text::font::Weight::NORMAL {
        node.assign("font-weight", font.weight().0);
    }
    if font.italic() {
        node.assign("font-style", "italic");
    }
}

fn assign_fill<N>(node: &mut N, fill: Option<&render::Paint>)
where
    N: Node,
{
    if let Some(render::Paint::Solid(color)) = fill {
        node.assign("fill", color.html());
        if let Some(opacity) = color.opacity() {
            node.assign("fill-opacity", opacity);
        }
    } else {
        node.assign("fill", "none");
    }
}

fn assign_stroke<N>(node: &mut N, stroke: Option<&render::Stroke>)
where
    N: Node,
{
    if let Some(stroke) = stroke {
        let w = stroke.width;
        node.assign("stroke", stroke.color.html());
        node.assign("stroke-width", w);
        if let Some(opacity) = stroke.color.opacity() {
            node.assign("stroke-opacity", opacity);
        }
        match stroke.pattern {
            render::LinePattern::Solid => (),
            render::LinePattern::Dash(dash) => {
                let array: Vec<f32> = dash.iter().map(|d| d * w).collect();
                node.assign("stroke-dasharray", array)
            }
        }
    } else {
        node.assign("stroke", "none");
    }
}

fn path_data(path: &geom::Path) -> element::path::Data {
    let mut data = element::path::Data::new();
    for segment in path.segments() {
        match segment {
            geom::PathSegment::MoveTo(p) => {
                data = data.move_to((p.x, p.y));
            }
            geom::PathSegment::LineTo(p) => {
                data = data.line_to((p.x, p.y));
            }
            geom::PathSegment::QuadTo(p1, p2) => {
                data = data.quadratic_curve_to((p1.x, p1.y, p2.x, p2.y));
            }
            geom::PathSegment::CubicTo(p1, p2, p3) => {
                data = data.cubic_curve_to((p1.x, p1.y, p2.x, p2.y, p3.x, p3.y));
            }
            geom::PathSegment::Close => {
                data = data.close();
            }
        }
    }
    data
}

fn rectangle_node(rect: &geom::Rect) -> element::Rectangle {
    element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
}
