// canvas3d.rs
use egui::{Pos2, Vec2, Color32, Stroke, Rect, Ui, Response, Sense};
use glam::{Mat4, Vec3};
use crate::body::{BodyModel, MaterialState, PartId, PartKind};
use crate::json_loader::{CameraConfig, Fog, Lights, Material, Palette, ViewerConfig};

const NEAR: f32 = 0.1;
const GRID_Y: f32 = -18.0;
const PITCH_LIMIT: f32 = 1.4;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera3D { pub target: Vec3, pub yaw: f32, pub pitch: f32, pub radius: f32, pub fov: f32 }

impl Default for Camera3D {
    fn default() -> Self { Self { target: Vec3::new(0.0, 20.0, 0.0), yaw: 0.0, pitch: 0.0, radius: 60.0, fov: 75f32.to_radians() } }
}

impl Camera3D {
    pub fn from_config(c: &CameraConfig) -> Self {
        let pitch = c.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self { target: Vec3::from(c.target), yaw: c.yaw, pitch, radius: c.distance, fov: c.fov_degrees.to_radians() }
    }

    pub fn eye(&self) -> Vec3 {
        let ((sy,cy),(sp,cp)) = (self.yaw.sin_cos(), self.pitch.sin_cos());
        self.target + self.radius * Vec3::new(cp*sy, sp, cp*cy)
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let fwd = (self.target - self.eye()).normalize();
        let right = fwd.cross(Vec3::Y).normalize();
        (fwd, right, right.cross(fwd))
    }

    /// Perspective projection into `r`; returns the screen point and view depth,
    /// or `None` for points behind the near plane.
    pub fn project(&self, p: Vec3, r: Rect) -> Option<(Pos2, f32)> {
        let (fwd, right, up) = self.basis();
        let d = p - self.eye();
        let z = d.dot(fwd);
        if z < NEAR { return None; }
        let focal = r.height() * 0.5 / (self.fov * 0.5).tan();
        Some((Pos2::new(r.center().x + d.dot(right) / z * focal, r.center().y - d.dot(up) / z * focal), z))
    }

    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw -= drag.x * 0.008;
        self.pitch = (self.pitch + drag.y * 0.008).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.radius = (self.radius * (1.0 - scroll * 0.001)).clamp(10.0, 200.0);
    }
}

pub fn material(palette: &Palette, kind: PartKind, state: MaterialState) -> &Material {
    match (kind, state) {
        (PartKind::Bone,   MaterialState::Normal) => &palette.bone_normal,
        (PartKind::Bone,   MaterialState::Active) => &palette.bone_active,
        (PartKind::Muscle, MaterialState::Normal) => &palette.muscle_normal,
        (PartKind::Muscle, MaterialState::Active) => &palette.muscle_active,
    }
}

fn rgb(c: [u8; 3]) -> Vec3 { Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32) / 255.0 }

/// Lambert term per light plus the material's emissive glow. `n` is a unit normal.
pub fn shade(mat: &Material, n: Vec3, lights: &Lights) -> Color32 {
    let base = rgb(mat.color);
    let mut c = rgb(lights.ambient.color) * lights.ambient.intensity * base;
    for l in &lights.directional {
        let k = n.dot(Vec3::from(l.position).normalize_or_zero()).max(0.0) * l.intensity;
        c += rgb(l.color) * base * k;
    }
    c += rgb(mat.emissive) * mat.emissive_intensity;
    let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Color32::from_rgba_unmultiplied(c.x as u8, c.y as u8, c.z as u8, (mat.opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Blends `c` toward the fog colour by its view depth; alpha is kept.
pub fn fogged(c: Color32, fog: &Fog, z: f32) -> Color32 {
    let k = fog.factor(z);
    if k <= 0.0 { return c; }
    let [r, g, b, a] = c.to_srgba_unmultiplied();
    let mix = |x: u8, f: u8| (x as f32 + (f as f32 - x as f32) * k).round() as u8;
    Color32::from_rgba_unmultiplied(mix(r, fog.color[0]), mix(g, fog.color[1]), mix(b, fog.color[2]), a)
}

struct Tri { pts: [Pos2; 3], z: f32, color: Color32, part: Option<PartId> }

fn contains(t: &Tri, p: Pos2) -> bool {
    let side = |a: Pos2, b: Pos2| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let [a, b, c] = t.pts;
    let (d1, d2, d3) = (side(a, b), side(b, c), side(c, a));
    !((d1 < 0.0 || d2 < 0.0 || d3 < 0.0) && (d1 > 0.0 || d2 > 0.0 || d3 > 0.0))
}

/// Projects, shades, fogs and depth-sorts every primitive, far to near.
fn triangles(model: &BodyModel, cfg: &ViewerConfig, cam: &Camera3D, world: &[Mat4], r: Rect) -> Vec<Tri> {
    let eye = cam.eye();
    let mut out = Vec::new();
    for (i, node) in model.nodes().iter().enumerate() {
        let (Some(mesh), Some(owner)) = (&node.mesh, node.owner) else { continue };
        let mat = material(&cfg.materials, model.part_by_id(owner).kind, model.primitive_state(i));
        let verts: Vec<Vec3> = mesh.positions.iter().map(|p| world[i].transform_point3(*p)).collect();
        let proj: Vec<_> = verts.iter().map(|v| cam.project(*v, r)).collect();
        for t in &mesh.triangles {
            let [a, b, c] = t.map(|v| v as usize);
            let (Some((pa,za)), Some((pb,zb)), Some((pc,zc))) = (proj[a], proj[b], proj[c]) else { continue };
            let n = (verts[b] - verts[a]).cross(verts[c] - verts[a]);
            if n.length_squared() < 1e-12 { continue; }
            let mut n = n.normalize();
            if n.dot(eye - (verts[a] + verts[b] + verts[c]) / 3.0) < 0.0 { n = -n; }
            let z = (za + zb + zc) / 3.0;
            out.push(Tri { pts: [pa, pb, pc], z, color: fogged(shade(mat, n, &cfg.lights), &cfg.fog, z), part: Some(owner) });
        }
    }
    out.sort_by(|a, b| b.z.total_cmp(&a.z));
    out
}

/// Screen positions of both anchors of every active muscle.
fn muscle_anchors(model: &BodyModel, cam: &Camera3D, world: &[Mat4], r: Rect) -> Vec<Pos2> {
    let group = world[model.groups().muscles];
    model.registry(PartKind::Muscle).ids().iter()
        .map(|&id| model.part_by_id(id))
        .filter(|p| p.is_active())
        .filter_map(|p| p.span)
        .flat_map(|s| [s.start, s.end])
        .filter_map(|a| cam.project(group.transform_point3(a), r).map(|(pos, _)| pos))
        .collect()
}

/// Drags orbit the camera unless the press began on the view buttons.
fn drag_orbits(press_origin: Option<Pos2>, button_area: Rect) -> bool {
    !press_origin.is_some_and(|pos| button_area.contains(pos))
}

pub struct CanvasOutput { pub response: Response, pub hovered: Option<PartId> }

pub fn draw_3d_canvas(ui: &mut Ui, model: &BodyModel, cfg: &ViewerConfig, cam: &mut Camera3D, figure_yaw: f32, size: Vec2) -> CanvasOutput {
    let (resp, p) = ui.allocate_painter(size, Sense::click_and_drag());
    let [r, g, b] = cfg.background;
    p.rect_filled(resp.rect, 0.0, Color32::from_rgb(r, g, b));

    // Floor grid under the feet
    let grid_color = Color32::from_gray(45);
    let mut k = -30.0;
    while k <= 30.0 {
        for (a, b) in [(Vec3::new(k, GRID_Y, -30.0), Vec3::new(k, GRID_Y, 30.0)), (Vec3::new(-30.0, GRID_Y, k), Vec3::new(30.0, GRID_Y, k))] {
            if let (Some((pa, za)), Some((pb, zb))) = (cam.project(a, resp.rect), cam.project(b, resp.rect)) {
                p.line_segment([pa, pb], Stroke::new(1.0, fogged(grid_color, &cfg.fog, (za + zb) * 0.5)));
            }
        }
        k += 5.0;
    }

    let world = model.world_matrices(Mat4::from_rotation_y(figure_yaw));
    let tris = triangles(model, cfg, cam, &world, resp.rect);
    let mut mesh = egui::Mesh::default();
    for t in &tris {
        let base = mesh.vertices.len() as u32;
        for pt in t.pts { mesh.colored_vertex(pt, t.color); }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    p.add(egui::Shape::mesh(mesh));

    let [r, g, b] = cfg.materials.muscle_active.color;
    for a in muscle_anchors(model, cam, &world, resp.rect) {
        p.circle(a, 3.0, Color32::from_rgb(r, g, b), Stroke::new(1.0, Color32::WHITE));
    }

    // Buttons paint over the figure; camera input lands on the next frame.
    let button_area = draw_view_buttons(ui, cam, resp.rect);
    if resp.dragged() && drag_orbits(ui.input(|i| i.pointer.press_origin()), button_area) {
        cam.orbit(resp.drag_delta());
    }
    if resp.hovered() {
        let s = ui.input(|i| i.smooth_scroll_delta.y);
        if s != 0.0 { cam.zoom(s); }
    }

    let hover = ui.input(|i| i.pointer.hover_pos())
        .filter(|pos| resp.rect.contains(*pos) && !button_area.contains(*pos));
    let hovered = hover.and_then(|pos| tris.iter().rev().find(|t| contains(t, pos))).and_then(|t| t.part);

    p.text(resp.rect.left_bottom() + Vec2::new(8., -6.), egui::Align2::LEFT_BOTTOM, &cfg.text.canvas_hint,
        egui::FontId::proportional(11.0), Color32::from_rgba_premultiplied(200,200,200,120));
    CanvasOutput { response: resp, hovered }
}

fn draw_view_buttons(ui: &mut Ui, cam: &mut Camera3D, rect: Rect) -> Rect {
    let btn_size = Vec2::new(64.0, 26.0);
    let spacing = 6.0;
    let pad = 12.0;

    let views = [
        ("Davant",   0.0,                          Color32::from_rgb(100, 180, 255)),
        ("Darrere",  std::f32::consts::PI,         Color32::from_rgb(0, 200, 220)),
        ("Esquerra", -std::f32::consts::FRAC_PI_2, Color32::from_rgb(80, 200, 80)),
        ("Dreta",    std::f32::consts::FRAC_PI_2,  Color32::from_rgb(255, 160, 0)),
    ];

    let total_width = (btn_size.x + spacing) * views.len() as f32 - spacing;
    let start_x = rect.center().x - total_width / 2.0;
    let y = rect.min.y + pad;
    let button_area = Rect::from_min_size(
        Pos2::new(start_x - spacing, y - spacing),
        Vec2::new(total_width + spacing * 2.0, btn_size.y + spacing * 2.0)
    );

    for (i, (label, yaw, color)) in views.iter().enumerate() {
        let btn_rect = Rect::from_min_size(Pos2::new(start_x + (btn_size.x + spacing) * i as f32, y), btn_size);
        let hovered = ui.rect_contains_pointer(btn_rect);
        if hovered && ui.input(|i| i.pointer.primary_clicked()) {
            cam.yaw = *yaw;
            cam.pitch = 0.0;
        }
        let is_active = (cam.yaw - yaw).abs() < 0.1 && cam.pitch.abs() < 0.1;

        let (opacity_mult, border_alpha) = if is_active { (0.55, 200) } else if hovered { (0.4, 140) } else { (0.25, 90) };
        let border = Color32::from_rgba_premultiplied(
            ((color.r() as u16 + 155) / 2) as u8,
            ((color.g() as u16 + 155) / 2) as u8,
            ((color.b() as u16 + 155) / 2) as u8,
            border_alpha
        );
        let painter = ui.painter();
        painter.rect_filled(btn_rect, 5.0, color.linear_multiply(opacity_mult));
        painter.rect_stroke(btn_rect, 5.0, Stroke::new(if is_active { 2.0 } else { 1.5 }, border), egui::StrokeKind::Outside);
        painter.text(btn_rect.center(), egui::Align2::CENTER_CENTER, label,
            egui::FontId::proportional(12.0), Color32::from_rgba_premultiplied(255, 255, 255, if is_active { 240 } else { 180 }));
    }

    button_area
}
