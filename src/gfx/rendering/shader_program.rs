//! Shader programs: a vertex and a fragment stage linked into a render pipeline
//!
//! Each stage is parsed and validated with naga before it reaches the device,
//! so a typo in a WGSL file surfaces as a [`LanternError::ShaderCompile`] with
//! the full diagnostic instead of a device panic. Linking checks that every
//! location the fragment stage reads is written by the vertex stage with the
//! same type, then builds the pipeline inside a validation error scope.

use std::{borrow::Cow, collections::BTreeMap, path::Path};

use log::{debug, error};
use naga::{
    valid::{Capabilities, ValidationFlags, Validator},
    Binding, Module, TypeInner,
};
use wgpu::{
    BindGroupLayout, BlendState, ColorTargetState, ColorWrites, CompareFunction, DepthBiasState,
    DepthStencilState, Device, ErrorFilter, Face, FragmentState, FrontFace, MultisampleState,
    PipelineCompilationOptions, PipelineLayoutDescriptor, PolygonMode, PrimitiveState,
    PrimitiveTopology, RenderPipeline, RenderPipelineDescriptor, ShaderModule,
    ShaderModuleDescriptor, ShaderSource, StencilState, TextureFormat, VertexBufferLayout,
    VertexState,
};

use crate::{
    error::{LanternError, Result, ShaderStage},
    gfx::{resources::TextureResource, scene::vertex::Vertex3D},
};

/// Render state a program is linked with
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
    pub blend: Option<BlendState>,
    pub vertex_layouts: Vec<VertexBufferLayout<'static>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_format: Some(TextureResource::DEPTH_FORMAT),
            color_format: TextureFormat::Bgra8Unorm,
            blend: Some(BlendState::REPLACE),
            vertex_layouts: vec![Vertex3D::desc()],
        }
    }
}

impl PipelineConfig {
    /// Config drawing [`Vertex3D`] meshes into a surface of `color_format`
    pub fn new(label: &str, color_format: TextureFormat) -> Self {
        Self {
            label: label.to_owned(),
            color_format,
            ..Default::default()
        }
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }
}

/// Parses and validates one stage, checking its entry point exists
pub fn compile_stage(label: &str, stage: ShaderStage, source: &str) -> Result<Module> {
    let compile_error = |log: String| LanternError::ShaderCompile {
        label: label.to_owned(),
        stage,
        log,
    };

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|err| compile_error(err.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|err| compile_error(err.emit_to_string(source)))?;

    let expected = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == expected && ep.name == stage.entry_point());
    if !has_entry {
        return Err(compile_error(format!(
            "missing @{stage} entry point '{}'",
            stage.entry_point()
        )));
    }

    Ok(module)
}

/// Checks every fragment input location against the vertex outputs
pub fn check_interface(label: &str, vertex: &Module, fragment: &Module) -> Result<()> {
    let link_error = |log: String| LanternError::ShaderLink {
        label: label.to_owned(),
        log,
    };

    let outputs = stage_locations(vertex, ShaderStage::Vertex);
    let inputs = stage_locations(fragment, ShaderStage::Fragment);

    for (location, input_ty) in &inputs {
        match outputs.get(location) {
            None => {
                return Err(link_error(format!(
                    "fragment input @location({location}) is not written by the vertex stage"
                )))
            }
            Some(output_ty) if output_ty != input_ty => {
                return Err(link_error(format!(
                    "@location({location}) is {output_ty:?} in the vertex stage but {input_ty:?} in the fragment stage"
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Location-bound values crossing the vertex/fragment boundary
///
/// For the vertex stage these are the outputs, for the fragment stage the inputs.
fn stage_locations(module: &Module, stage: ShaderStage) -> BTreeMap<u32, TypeInner> {
    let mut locations = BTreeMap::new();
    let Some(entry) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == stage.entry_point())
    else {
        return locations;
    };

    let mut collect = |ty: naga::Handle<naga::Type>, binding: Option<&Binding>| {
        if let Some(Binding::Location { location, .. }) = binding {
            locations.insert(*location, module.types[ty].inner.clone());
        } else if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
            for member in members {
                if let Some(Binding::Location { location, .. }) = &member.binding {
                    locations.insert(*location, module.types[member.ty].inner.clone());
                }
            }
        }
    };

    match stage {
        ShaderStage::Vertex => {
            if let Some(result) = &entry.function.result {
                collect(result.ty, result.binding.as_ref());
            }
        }
        ShaderStage::Fragment => {
            for argument in &entry.function.arguments {
                collect(argument.ty, argument.binding.as_ref());
            }
        }
    }
    locations
}

/// A compiled pair of shader stages
pub struct ShaderProgram {
    label: String,
    vertex_module: ShaderModule,
    fragment_module: ShaderModule,
    vertex_ir: Module,
    fragment_ir: Module,
}

impl ShaderProgram {
    /// Reads both stages from disk and compiles them
    pub fn from_files(
        device: &Device,
        label: &str,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| LanternError::io(path, source))
        };
        let vertex_source = read(vertex_path.as_ref())?;
        let fragment_source = read(fragment_path.as_ref())?;
        debug!(
            "Compiling program '{}' from {} and {}",
            label,
            vertex_path.as_ref().display(),
            fragment_path.as_ref().display()
        );
        Self::from_sources(device, label, &vertex_source, &fragment_source)
    }

    pub fn from_sources(
        device: &Device,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let vertex_ir = compile_stage(label, ShaderStage::Vertex, vertex_source)?;
        let fragment_ir = compile_stage(label, ShaderStage::Fragment, fragment_source)?;

        let vertex_module = create_module(device, label, ShaderStage::Vertex, vertex_source)?;
        let fragment_module = create_module(device, label, ShaderStage::Fragment, fragment_source)?;

        Ok(Self {
            label: label.to_owned(),
            vertex_module,
            fragment_module,
            vertex_ir,
            fragment_ir,
        })
    }

    /// Builds a render pipeline from both stages
    pub fn link(&self, device: &Device, config: &PipelineConfig) -> Result<RenderPipeline> {
        check_interface(&self.label, &self.vertex_ir, &self.fragment_ir)?;

        let layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();

        device.push_error_scope(ErrorFilter::Validation);

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", config.label)),
            bind_group_layouts: &layout_refs,
            push_constant_ranges: &[],
        });

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(&config.label),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &self.vertex_module,
                entry_point: Some(ShaderStage::Vertex.entry_point()),
                buffers: &config.vertex_layouts,
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &self.fragment_module,
                entry_point: Some(ShaderStage::Fragment.entry_point()),
                targets: &[Some(ColorTargetState {
                    format: config.color_format,
                    blend: config.blend,
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState {
                topology: config.primitive_topology,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode: config.cull_mode,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            error!("Pipeline '{}' rejected: {}", config.label, err);
            return Err(LanternError::ShaderLink {
                label: self.label.clone(),
                log: err.to_string(),
            });
        }

        debug!("Linked pipeline '{}'", config.label);
        Ok(pipeline)
    }
}

fn create_module(
    device: &Device,
    label: &str,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderModule> {
    device.push_error_scope(ErrorFilter::Validation);
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(&format!("{label} ({stage})")),
        source: ShaderSource::Wgsl(Cow::Borrowed(source)),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(LanternError::ShaderCompile {
            label: label.to_owned(),
            stage,
            log: err.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &[(&str, &str, &str)] = &[
        (
            "triangle",
            include_str!("../../../shaders/triangle.vert.wgsl"),
            include_str!("../../../shaders/triangle.frag.wgsl"),
        ),
        (
            "textured",
            include_str!("../../../shaders/textured.vert.wgsl"),
            include_str!("../../../shaders/textured.frag.wgsl"),
        ),
        (
            "lit",
            include_str!("../../../shaders/lit.vert.wgsl"),
            include_str!("../../../shaders/lit.frag.wgsl"),
        ),
        (
            "lamp",
            include_str!("../../../shaders/lamp.vert.wgsl"),
            include_str!("../../../shaders/lamp.frag.wgsl"),
        ),
        (
            "model",
            include_str!("../../../shaders/model.vert.wgsl"),
            include_str!("../../../shaders/model.frag.wgsl"),
        ),
    ];

    const PASS_VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) i: u32) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(f32(i), 0.0, 0.0, 1.0);
    out.uv = vec2<f32>(0.0, 0.0);
    return out;
}
"#;

    #[test]
    fn test_shipped_shaders_compile_and_link() {
        for (label, vs, fs) in SHIPPED {
            let vertex = compile_stage(label, ShaderStage::Vertex, vs)
                .unwrap_or_else(|e| panic!("{e}"));
            let fragment = compile_stage(label, ShaderStage::Fragment, fs)
                .unwrap_or_else(|e| panic!("{e}"));
            check_interface(label, &vertex, &fragment).unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn test_syntax_error_reports_stage_and_log() {
        let broken = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0) }";
        let err = compile_stage("broken", ShaderStage::Fragment, broken).unwrap_err();
        match err {
            LanternError::ShaderCompile { label, stage, log } => {
                assert_eq!(label, "broken");
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_type_error_fails_validation() {
        let mistyped = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let c: vec3<f32> = vec3<f32>(1.0, 0.5, 0.2);
    return c;
}
"#;
        assert!(matches!(
            compile_stage("mistyped", ShaderStage::Fragment, mistyped),
            Err(LanternError::ShaderCompile { .. })
        ));
    }

    #[test]
    fn test_missing_entry_point() {
        assert!(matches!(
            compile_stage("pass", ShaderStage::Fragment, PASS_VS),
            Err(LanternError::ShaderCompile { .. })
        ));
    }

    #[test]
    fn test_interface_mismatch_fails_link() {
        let vertex = compile_stage("pass", ShaderStage::Vertex, PASS_VS).unwrap();

        let wrong_type = compile_stage(
            "pass",
            ShaderStage::Fragment,
            r#"
@fragment
fn fs_main(@location(0) uv: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 1.0);
}
"#,
        )
        .unwrap();
        assert!(matches!(
            check_interface("pass", &vertex, &wrong_type),
            Err(LanternError::ShaderLink { .. })
        ));

        let unwritten = compile_stage(
            "pass",
            ShaderStage::Fragment,
            r#"
@fragment
fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return tint;
}
"#,
        )
        .unwrap();
        assert!(matches!(
            check_interface("pass", &vertex, &unwritten),
            Err(LanternError::ShaderLink { .. })
        ));

        let matching = compile_stage(
            "pass",
            ShaderStage::Fragment,
            r#"
@fragment
fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#,
        )
        .unwrap();
        assert!(check_interface("pass", &vertex, &matching).is_ok());
    }
}
