//! Scene → GPU binding layer.
//!
//! Each scene object gets one [`MotifBinding`] holding its geometry
//! buffers, built when the population is built. Per frame, [`sync`]
//! walks objects and bindings in lock-step and uploads fresh instance
//! data. A missing or mismatched binding skips that object for the frame
//! (logged at debug level); the next frame retries independently, and
//! nothing propagates out of the render loop.

use glam::Mat4;

use crate::options::ColorOptions;
use crate::render::context::RenderContext;
use crate::render::geometry;
use crate::scene::motifs::{
    PolyhedronKind, GRID_DIVISIONS, GRID_EXTENT,
};
use crate::scene::{Motif, Scene};
use crate::render::{
    LineBatch, LineRenderer, MeshBatch, MeshInstance, MeshRenderer,
    ParticleBatch, ParticleRenderer,
};

/// Crease threshold for deriving wireframe outlines, in degrees.
const OUTLINE_THRESHOLD_DEG: f32 = 1.0;
/// Marker radius of helix strand points.
const HELIX_NODE_RADIUS: f32 = 0.06;
/// Marker radius of network nodes.
const NETWORK_NODE_RADIUS: f32 = 0.08;

/// Tint + emissive for one draw.
#[derive(Clone, Copy)]
struct Style {
    color_of: fn(&ColorOptions) -> [f32; 3],
    alpha: f32,
    emissive: f32,
}

impl Style {
    fn instance(&self, model: Mat4, colors: &ColorOptions) -> MeshInstance {
        MeshInstance::new(
            model,
            (self.color_of)(colors),
            self.alpha,
            self.emissive,
        )
    }
}

const OCTA_SOLID: Style = Style {
    color_of: |c| c.ink,
    alpha: 0.4,
    emissive: 0.0,
};
const OCTA_OUTLINE: Style = Style {
    color_of: |c| c.accent,
    alpha: 0.6,
    emissive: 0.0,
};
const ICOSA_SOLID: Style = Style {
    color_of: |c| c.ink,
    alpha: 0.35,
    emissive: 0.0,
};
const ICOSA_OUTLINE: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.45,
    emissive: 0.0,
};
const RING_STYLE: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.3,
    emissive: 0.3,
};
const BAR_SOLID: Style = Style {
    color_of: |c| c.charcoal,
    alpha: 0.6,
    emissive: 0.0,
};
const BAR_OUTLINE: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.5,
    emissive: 0.0,
};
const HELIX_LINKS: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.15,
    emissive: 0.0,
};
const NETWORK_NODE: Style = Style {
    color_of: |c| c.accent,
    alpha: 1.0,
    emissive: 0.4,
};
const NETWORK_LINKS: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.2,
    emissive: 0.0,
};
const GRID_STYLE: Style = Style {
    color_of: |c| c.accent_dim,
    alpha: 0.06,
    emissive: 0.0,
};

/// GPU resources for one scene object.
pub(crate) enum MotifBinding {
    /// Solid + outline sharing one transform source.
    Polyhedron(MeshBatch),
    /// Torus with the major radius baked into the geometry.
    Ring(MeshBatch),
    /// Strand markers + cross links under one group transform.
    Helix {
        /// Marker spheres.
        nodes: MeshBatch,
        /// Cross-strand links.
        links: LineBatch,
    },
    /// Bar solids + outlines.
    Bars(MeshBatch),
    /// Particle quad instances.
    Particles(ParticleBatch),
    /// Node markers + proximity links under one group transform.
    Network {
        /// Node spheres.
        nodes: MeshBatch,
        /// Proximity links.
        links: LineBatch,
    },
    /// One batch per curve (per-curve opacity).
    Flows(Vec<LineBatch>),
    /// The backdrop grid.
    Grid(LineBatch),
}

/// Build one binding per scene object, in population order.
pub(crate) fn build_bindings(
    context: &RenderContext,
    scene: &Scene,
) -> Vec<MotifBinding> {
    scene
        .objects()
        .iter()
        .map(|object| build_binding(context, object))
        .collect()
}

fn build_binding(context: &RenderContext, object: &Motif) -> MotifBinding {
    match object {
        Motif::Polyhedron(p) => {
            let mesh = match p.kind {
                PolyhedronKind::Octahedron => geometry::octahedron(),
                PolyhedronKind::Icosahedron => geometry::icosphere(1),
            };
            let outline =
                geometry::edge_lines(&mesh, OUTLINE_THRESHOLD_DEG);
            MotifBinding::Polyhedron(MeshBatch::new(
                context,
                "Polyhedron",
                &mesh,
                Some(&outline),
                1,
            ))
        }
        Motif::Ring(r) => {
            let mesh = geometry::torus(r.radius, 0.02, 8, 80);
            MotifBinding::Ring(MeshBatch::new(
                context, "Ring", &mesh, None, 1,
            ))
        }
        Motif::Helix(h) => {
            let sphere = geometry::icosphere(1);
            let nodes = MeshBatch::new(
                context,
                "Helix Nodes",
                &sphere,
                None,
                h.nodes().len(),
            );
            let segments: Vec<glam::Vec3> =
                h.links().iter().flatten().copied().collect();
            let links = LineBatch::new(context, "Helix", &segments, 1);
            MotifBinding::Helix { nodes, links }
        }
        Motif::Bars(field) => {
            let mesh = geometry::cuboid(0.4, 1.0, 0.4);
            let outline =
                geometry::edge_lines(&mesh, OUTLINE_THRESHOLD_DEG);
            MotifBinding::Bars(MeshBatch::new(
                context,
                "Bars",
                &mesh,
                Some(&outline),
                field.bars.len(),
            ))
        }
        Motif::Particles(cloud) => MotifBinding::Particles(
            ParticleBatch::new(context, cloud.len()),
        ),
        Motif::Network(graph) => {
            let sphere = geometry::icosphere(1);
            let nodes = MeshBatch::new(
                context,
                "Network Nodes",
                &sphere,
                None,
                graph.nodes().len(),
            );
            let segments: Vec<glam::Vec3> = graph
                .edges()
                .iter()
                .flat_map(|&(i, j)| {
                    [graph.nodes()[i], graph.nodes()[j]]
                })
                .collect();
            let links = LineBatch::new(context, "Network", &segments, 1);
            MotifBinding::Network { nodes, links }
        }
        Motif::Flows(flows) => MotifBinding::Flows(
            flows
                .curves
                .iter()
                .map(|curve| {
                    let segments: Vec<glam::Vec3> = curve
                        .points
                        .windows(2)
                        .flat_map(|w| [w[0], w[1]])
                        .collect();
                    LineBatch::new(context, "Flow Curve", &segments, 1)
                })
                .collect(),
        ),
        Motif::Grid(_) => MotifBinding::Grid(LineBatch::new(
            context,
            "Grid",
            &geometry::grid_lines(GRID_EXTENT, GRID_DIVISIONS),
            1,
        )),
    }
}

/// Upload this frame's instance data for every object whose binding
/// matches; skip (and log) the rest.
pub(crate) fn sync(
    scene: &Scene,
    bindings: &mut [MotifBinding],
    queue: &wgpu::Queue,
    colors: &ColorOptions,
) {
    for (index, (object, binding)) in
        scene.objects().iter().zip(bindings.iter_mut()).enumerate()
    {
        if !sync_one(object, binding, queue, colors) {
            log::debug!("scene object {index} has no matching binding");
        }
    }
}

fn sync_one(
    object: &Motif,
    binding: &mut MotifBinding,
    queue: &wgpu::Queue,
    colors: &ColorOptions,
) -> bool {
    match (object, binding) {
        (Motif::Polyhedron(p), MotifBinding::Polyhedron(batch)) => {
            let model = p.model_matrix();
            let (solid, outline) = match p.kind {
                PolyhedronKind::Octahedron => (OCTA_SOLID, OCTA_OUTLINE),
                PolyhedronKind::Icosahedron => {
                    (ICOSA_SOLID, ICOSA_OUTLINE)
                }
            };
            batch.write_instances(
                queue,
                &[solid.instance(model, colors)],
                &[outline.instance(model, colors)],
            );
        }
        (Motif::Ring(r), MotifBinding::Ring(batch)) => {
            batch.write_instances(
                queue,
                &[RING_STYLE.instance(r.model_matrix(), colors)],
                &[],
            );
        }
        (Motif::Helix(h), MotifBinding::Helix { nodes, links }) => {
            let group = h.group_matrix();
            let instances: Vec<MeshInstance> = h
                .nodes()
                .iter()
                .map(|node| {
                    let model = group
                        * Mat4::from_translation(node.position)
                        * Mat4::from_scale(glam::Vec3::splat(
                            HELIX_NODE_RADIUS,
                        ));
                    let color = if node.strand == 0 {
                        colors.accent
                    } else {
                        colors.accent_dim
                    };
                    MeshInstance::new(model, color, 1.0, 0.3)
                })
                .collect();
            nodes.write_instances(queue, &instances, &[]);
            links.write_instances(queue, &[
                HELIX_LINKS.instance(group, colors),
            ]);
        }
        (Motif::Bars(field), MotifBinding::Bars(batch)) => {
            let group = field.group_matrix();
            let mut solids = Vec::with_capacity(field.bars.len());
            let mut outlines = Vec::with_capacity(field.bars.len());
            for bar in &field.bars {
                let model = group * bar.model_matrix();
                solids.push(BAR_SOLID.instance(model, colors));
                outlines.push(BAR_OUTLINE.instance(model, colors));
            }
            batch.write_instances(queue, &solids, &outlines);
        }
        (Motif::Particles(cloud), MotifBinding::Particles(batch)) => {
            batch.write_positions(queue, cloud.positions());
        }
        (Motif::Network(graph), MotifBinding::Network { nodes, links }) => {
            let group = graph.group_matrix();
            let instances: Vec<MeshInstance> = graph
                .nodes()
                .iter()
                .map(|&position| {
                    let model = group
                        * Mat4::from_translation(position)
                        * Mat4::from_scale(glam::Vec3::splat(
                            NETWORK_NODE_RADIUS,
                        ));
                    NETWORK_NODE.instance(model, colors)
                })
                .collect();
            nodes.write_instances(queue, &instances, &[]);
            links.write_instances(queue, &[
                NETWORK_LINKS.instance(group, colors),
            ]);
        }
        (Motif::Flows(flows), MotifBinding::Flows(batches)) => {
            for (curve, batch) in flows.curves.iter().zip(batches) {
                let instance = MeshInstance::new(
                    Mat4::IDENTITY,
                    colors.accent,
                    curve.opacity.max(0.0),
                    0.0,
                );
                batch.write_instances(queue, &[instance]);
            }
        }
        (Motif::Grid(grid), MotifBinding::Grid(batch)) => {
            batch.write_instances(queue, &[
                GRID_STYLE.instance(grid.model_matrix(), colors),
            ]);
        }
        _ => return false,
    }
    true
}

/// Draw every binding in backdrop order: grid and curves first, then
/// links, solids, outlines, and finally the additive particles.
pub(crate) fn draw<'a>(
    pass: &mut wgpu::RenderPass<'a>,
    bindings: &'a [MotifBinding],
    mesh_renderer: &'a MeshRenderer,
    line_renderer: &'a LineRenderer,
    particle_renderer: &'a ParticleRenderer,
    camera: &'a wgpu::BindGroup,
    lighting: &'a wgpu::BindGroup,
) {
    for binding in bindings {
        match binding {
            MotifBinding::Grid(batch) => {
                line_renderer.draw(pass, batch, camera, lighting);
            }
            MotifBinding::Flows(batches) => {
                for batch in batches {
                    line_renderer.draw(pass, batch, camera, lighting);
                }
            }
            MotifBinding::Helix { links, .. }
            | MotifBinding::Network { links, .. } => {
                line_renderer.draw(pass, links, camera, lighting);
            }
            _ => {}
        }
    }

    for binding in bindings {
        match binding {
            MotifBinding::Polyhedron(batch)
            | MotifBinding::Ring(batch)
            | MotifBinding::Bars(batch) => {
                mesh_renderer.draw(pass, batch, camera, lighting);
            }
            MotifBinding::Helix { nodes, .. }
            | MotifBinding::Network { nodes, .. } => {
                mesh_renderer.draw(pass, nodes, camera, lighting);
            }
            _ => {}
        }
    }

    for binding in bindings {
        if let MotifBinding::Polyhedron(batch) | MotifBinding::Bars(batch) =
            binding
        {
            line_renderer.draw_outline(pass, batch, camera, lighting);
        }
    }

    for binding in bindings {
        if let MotifBinding::Particles(batch) = binding {
            particle_renderer.draw(pass, batch, camera);
        }
    }
}
