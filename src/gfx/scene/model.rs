//! OBJ model import
//!
//! Import happens in two steps. [`ImportedScene::from_obj`] parses the file
//! into plain vertex, index and material data arranged as a node tree, with no
//! GPU involvement. [`Model::from_scene`] then walks that tree, uploads each
//! mesh and loads every referenced texture once through a [`TextureCache`].

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, info, warn};

use super::{
    mesh::{calculate_face_normals, calculate_tangents, DrawMesh, Mesh, MeshTexture, TextureKind},
    vertex::Vertex3D,
};
use crate::{
    error::{LanternError, Result},
    gfx::resources::{
        Material, MaterialBindings, MaterialUniform, SamplerConfig, TextureCache, TextureResource,
    },
};

/// Texture references of one material, in diffuse, specular, normal, height order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedMaterial {
    pub name: String,
    pub textures: Vec<(TextureKind, String)>,
    pub shininess: Option<f32>,
}

impl ImportedMaterial {
    fn from_mtl(material: &tobj::Material) -> Self {
        let height = ["map_disp", "disp"]
            .iter()
            .find_map(|key| material.unknown_param.get(*key).cloned());

        let textures = [
            (TextureKind::Diffuse, material.diffuse_texture.clone()),
            (TextureKind::Specular, material.specular_texture.clone()),
            (TextureKind::Normal, material.normal_texture.clone()),
            (TextureKind::Height, height),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|path| (kind, path)))
        .collect();

        Self {
            name: material.name.clone(),
            textures,
            shininess: material.shininess.filter(|s| *s > 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMesh {
    pub name: String,
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
    /// Index into [`ImportedScene::materials`], already bounds-checked
    pub material: Option<usize>,
}

/// A node of the imported hierarchy, referencing meshes by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportNode {
    pub name: String,
    pub meshes: Vec<usize>,
    pub children: Vec<ImportNode>,
}

impl ImportNode {
    /// Mesh indices in depth-first order, a node's own meshes before its children's
    pub fn mesh_order(&self) -> Vec<usize> {
        let mut order = Vec::new();
        self.collect_meshes(&mut order);
        order
    }

    fn collect_meshes(&self, order: &mut Vec<usize>) {
        order.extend_from_slice(&self.meshes);
        for child in &self.children {
            child.collect_meshes(order);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedScene {
    /// Directory of the model file, textures are resolved relative to it
    pub directory: PathBuf,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub root: ImportNode,
}

/// Material index for a mesh. Indices are 0-based; a mesh without a material
/// or with an index past the end has none.
pub fn resolve_material(material_id: Option<usize>, material_count: usize) -> Option<usize> {
    material_id.filter(|&id| id < material_count)
}

impl ImportedScene {
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| LanternError::Import {
            path: path.to_path_buf(),
            source,
        })?;

        let materials: Vec<ImportedMaterial> = match materials {
            Ok(materials) => materials.iter().map(ImportedMaterial::from_mtl).collect(),
            Err(err) => {
                warn!(
                    "No usable material library for {} ({}), meshes will be untextured",
                    path.display(),
                    err
                );
                Vec::new()
            }
        };

        if models.is_empty() {
            return Err(LanternError::IncompleteScene {
                path: path.to_path_buf(),
                reason: "the file contains no meshes".to_string(),
            });
        }

        let mut meshes = Vec::with_capacity(models.len());
        let mut root = ImportNode {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Default::default()
        };

        for model in &models {
            let mesh = convert_mesh(path, model, materials.len())?;
            if model.mesh.material_id.is_some() && mesh.material.is_none() {
                warn!(
                    "Mesh '{}' references material {:?} but only {} exist",
                    model.name,
                    model.mesh.material_id,
                    materials.len()
                );
            }
            root.children.push(ImportNode {
                name: model.name.clone(),
                meshes: vec![meshes.len()],
                children: Vec::new(),
            });
            meshes.push(mesh);
        }

        debug!(
            "Imported {} with {} meshes and {} materials",
            path.display(),
            meshes.len(),
            materials.len()
        );

        Ok(Self {
            directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            meshes,
            materials,
            root,
        })
    }

    /// Texture references of a mesh's material, empty if it has none
    pub fn textures_of(&self, mesh: &ImportedMesh) -> &[(TextureKind, String)] {
        mesh.material
            .and_then(|index| self.materials.get(index))
            .map(|material| material.textures.as_slice())
            .unwrap_or(&[])
    }

    /// Where a texture path written in a material is found on disk
    pub fn texture_path(&self, texture: &str) -> PathBuf {
        let file_name = Path::new(texture)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(texture));
        self.directory.join(file_name)
    }
}

fn convert_mesh(path: &Path, model: &tobj::Model, material_count: usize) -> Result<ImportedMesh> {
    let mesh = &model.mesh;
    let incomplete = |reason: String| LanternError::IncompleteScene {
        path: path.to_path_buf(),
        reason: format!("mesh '{}': {}", model.name, reason),
    };

    if mesh.positions.is_empty() || mesh.positions.len() % 3 != 0 {
        return Err(incomplete(format!(
            "{} position components is not a whole number of vertices",
            mesh.positions.len()
        )));
    }
    let vertex_count = mesh.positions.len() / 3;
    if let Some(index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(incomplete(format!(
            "index {} is out of range for {} vertices",
            index, vertex_count
        )));
    }

    let has_normals = mesh.normals.len() == mesh.positions.len();
    let has_tex_coords = mesh.texcoords.len() == vertex_count * 2;

    let mut vertices: Vec<Vertex3D> = (0..vertex_count)
        .map(|i| {
            let position = [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ];
            let normal = if has_normals {
                [
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                ]
            } else {
                [0.0; 3]
            };
            // OBJ puts the texture origin at the bottom left
            let tex_coords = if has_tex_coords {
                [mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1]]
            } else {
                [0.0; 2]
            };
            Vertex3D::new(position, normal, tex_coords)
        })
        .collect();

    if !has_normals {
        debug!("Computing normals for mesh '{}'", model.name);
        calculate_face_normals(&mut vertices, &mesh.indices);
    }
    if has_tex_coords {
        calculate_tangents(&mut vertices, &mesh.indices);
    }

    Ok(ImportedMesh {
        name: model.name.clone(),
        vertices,
        indices: mesh.indices.clone(),
        material: resolve_material(mesh.material_id, material_count),
    })
}

/// Resolves texture references through `cache`, calling `load` only for paths
/// not seen before
pub fn collect_textures<T, E>(
    cache: &mut TextureCache<T>,
    references: &[(TextureKind, String)],
    mut load: impl FnMut(&str) -> std::result::Result<T, E>,
) -> std::result::Result<Vec<(TextureKind, String, Rc<T>)>, E> {
    references
        .iter()
        .map(|(kind, path)| {
            let texture = cache.get_or_try_insert_with(path, || load(path))?;
            Ok((*kind, path.clone(), texture))
        })
        .collect()
}

/// A mesh ready to draw together with the material built from its textures
pub struct ModelMesh {
    pub mesh: Mesh,
    pub material: Material,
}

pub struct Model {
    pub meshes: Vec<ModelMesh>,
    pub directory: PathBuf,
    textures: TextureCache<TextureResource>,
}

impl Model {
    /// Imports an OBJ file and uploads it
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let scene = ImportedScene::from_obj(path)?;
        let model = Self::from_scene(device, queue, bindings, &scene)?;
        info!(
            "Loaded model {} ({} meshes, {} textures)",
            path.display(),
            model.meshes.len(),
            model.texture_count()
        );
        Ok(model)
    }

    pub fn from_scene(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
        scene: &ImportedScene,
    ) -> Result<Self> {
        let mut textures = TextureCache::new();
        let white = Rc::new(TextureResource::white(device, queue));
        let mut meshes = Vec::with_capacity(scene.meshes.len());

        for index in scene.root.mesh_order() {
            let imported = &scene.meshes[index];
            let mesh_textures = collect_textures(
                &mut textures,
                scene.textures_of(imported),
                |texture| {
                    TextureResource::from_path(
                        device,
                        queue,
                        scene.texture_path(texture),
                        SamplerConfig::default(),
                    )
                },
            )?
            .into_iter()
            .map(|(kind, path, texture)| MeshTexture {
                kind,
                path,
                texture,
            })
            .collect();

            let mut mesh = Mesh::new(
                &imported.name,
                imported.vertices.clone(),
                imported.indices.clone(),
                mesh_textures,
            );
            mesh.upload(device);

            let map = |slot: &str| {
                mesh.texture_in_slot(slot)
                    .map(|t| Rc::clone(&t.texture))
                    .unwrap_or_else(|| Rc::clone(&white))
            };
            let shininess = imported
                .material
                .and_then(|i| scene.materials[i].shininess)
                .unwrap_or(MaterialUniform::DEFAULT_SHININESS);
            let material = Material::new(
                device,
                bindings,
                &imported.name,
                MaterialUniform::textured().with_shininess(shininess),
                map("texture_diffuse1"),
                map("texture_specular1"),
            );

            meshes.push(ModelMesh { mesh, material });
        }

        Ok(Self {
            meshes,
            directory: scene.directory.clone(),
            textures,
        })
    }

    /// Distinct textures uploaded for this model
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

pub trait DrawModel<'a> {
    fn draw_model(&mut self, model: &'a Model, material_group: u32);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_model(&mut self, model: &'b Model, material_group: u32) {
        for entry in &model.meshes {
            self.set_bind_group(material_group, entry.material.bind_group(), &[]);
            self.draw_mesh(&entry.mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, fs};

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "lantern-{}-{}",
                name,
                std::process::id()
            ));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, file: &str, contents: &str) -> PathBuf {
            let path = self.0.join(file);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    const CRATE_MTL: &str = "\
newmtl crate
Ns 64
map_Kd textures/crate.png
map_Ks crate_specular.png
";

    const TWO_OBJECTS: &str = "\
mtllib crate.mtl
o bare
v 0 0 -1
v 1 0 -1
v 0 1 -1
f 1 2 3
o textured
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl crate
f 4/1/1 5/2/1 6/3/1 7/4/1
";

    #[test]
    fn test_import_builds_node_per_object() {
        let dir = TempDir::new("import");
        dir.write("crate.mtl", CRATE_MTL);
        let scene = ImportedScene::from_obj(dir.write("crate.obj", TWO_OBJECTS)).unwrap();

        assert_eq!(scene.root.name, "crate");
        assert_eq!(scene.root.children.len(), 2);
        assert_eq!(scene.root.children[0].name, "bare");
        assert_eq!(scene.root.children[1].name, "textured");
        assert_eq!(scene.root.mesh_order(), vec![0, 1]);
        assert_eq!(scene.directory, dir.0);

        let textured = &scene.meshes[1];
        assert_eq!(textured.vertices.len(), 4);
        // quad triangulated
        assert_eq!(textured.indices.len(), 6);
        assert_eq!(textured.material, Some(0));
        // V flipped
        assert_eq!(textured.vertices[0].tex_coords, [0.0, 1.0]);
        assert_eq!(textured.vertices[2].tex_coords, [1.0, 0.0]);

        assert_eq!(
            scene.textures_of(textured),
            &[
                (TextureKind::Diffuse, "textures/crate.png".to_string()),
                (TextureKind::Specular, "crate_specular.png".to_string()),
            ]
        );
        assert_eq!(scene.materials[0].shininess, Some(64.0));
        assert_eq!(
            scene.texture_path("textures/crate.png"),
            dir.0.join("crate.png")
        );
    }

    #[test]
    fn test_mesh_without_material_gets_no_textures() {
        let dir = TempDir::new("bare");
        dir.write("crate.mtl", CRATE_MTL);
        let scene = ImportedScene::from_obj(dir.write("crate.obj", TWO_OBJECTS)).unwrap();

        let bare = &scene.meshes[0];
        assert_eq!(bare.material, None);
        assert!(scene.textures_of(bare).is_empty());
        // no vt or vn in the file
        for vertex in &bare.vertices {
            assert_eq!(vertex.tex_coords, [0.0, 0.0]);
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_missing_material_library_is_not_fatal() {
        let dir = TempDir::new("no-mtl");
        let scene = ImportedScene::from_obj(dir.write("crate.obj", TWO_OBJECTS)).unwrap();
        assert!(scene.materials.is_empty());
        assert_eq!(scene.meshes.len(), 2);
        assert!(scene.meshes.iter().all(|mesh| mesh.material.is_none()));
    }

    #[test]
    fn test_file_without_faces_is_incomplete() {
        let dir = TempDir::new("no-faces");
        let path = dir.write("points.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\n");
        assert!(matches!(
            ImportedScene::from_obj(path),
            Err(LanternError::IncompleteScene { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_import_error() {
        let dir = TempDir::new("missing");
        assert!(matches!(
            ImportedScene::from_obj(dir.0.join("nope.obj")),
            Err(LanternError::Import { .. })
        ));
    }

    #[test]
    fn test_out_of_range_index_is_incomplete() {
        let model = tobj::Model::new(
            tobj::Mesh {
                positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                indices: vec![0, 1, 3],
                ..Default::default()
            },
            "broken".to_string(),
        );
        let err = convert_mesh(Path::new("broken.obj"), &model, 0).unwrap_err();
        match err {
            LanternError::IncompleteScene { reason, .. } => assert!(reason.contains("index 3")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_material_is_zero_based() {
        assert_eq!(resolve_material(None, 3), None);
        assert_eq!(resolve_material(Some(0), 3), Some(0));
        assert_eq!(resolve_material(Some(2), 3), Some(2));
        assert_eq!(resolve_material(Some(3), 3), None);
        assert_eq!(resolve_material(Some(0), 0), None);
    }

    #[test]
    fn test_shared_texture_loads_once() {
        let mut cache = TextureCache::new();
        let loads = Cell::new(0);
        let load = |path: &str| {
            loads.set(loads.get() + 1);
            Ok::<_, LanternError>(format!("pixels of {path}"))
        };

        let first_mesh = [
            (TextureKind::Diffuse, "diffuse.png".to_string()),
            (TextureKind::Specular, "specular.png".to_string()),
        ];
        let second_mesh = [(TextureKind::Diffuse, "diffuse.png".to_string())];

        let first = collect_textures(&mut cache, &first_mesh, load).unwrap();
        let second = collect_textures(&mut cache, &second_mesh, load).unwrap();

        assert_eq!(loads.get(), 2);
        assert!(Rc::ptr_eq(&first[0].2, &second[0].2));
        assert_eq!(*second[0].2, "pixels of diffuse.png");
    }

    #[test]
    fn test_failed_texture_aborts_collection() {
        let mut cache: TextureCache<String> = TextureCache::new();
        let references = [(TextureKind::Diffuse, "missing.png".to_string())];
        let result = collect_textures(&mut cache, &references, |path| {
            Err(LanternError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            ))
        });
        assert!(matches!(result, Err(LanternError::Io { .. })));
        assert!(cache.is_empty());
    }
}
