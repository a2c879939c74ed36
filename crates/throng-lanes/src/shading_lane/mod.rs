// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Plans the shading network of a material.
//!
//! A material becomes a surface shader, a renderable shading group and, when
//! it has a color map, a file texture fed by a 2D placement node. The plan
//! only names nodes and lists attribute values; the build cache creates the
//! nodes and applies it.

use throng_core::description::{ColorChannel, Material};
use throng_core::math::{ColorSpace, Rgb};
use throng_core::scene::{AttrValue, ShaderKind};

/// The placement attributes wired into a file texture, as `(place, file)` pairs.
pub const PLACEMENT_CONNECTIONS: [(&str, &str); 18] = [
    ("coverage", "coverage"),
    ("translateFrame", "translateFrame"),
    ("rotateFrame", "rotateFrame"),
    ("mirrorU", "mirrorU"),
    ("mirrorV", "mirrorV"),
    ("stagger", "stagger"),
    ("wrapU", "wrapU"),
    ("wrapV", "wrapV"),
    ("repeatUV", "repeatUV"),
    ("offset", "offset"),
    ("rotateUV", "rotateUV"),
    ("noiseUV", "noiseUV"),
    ("vertexUvOne", "vertexUvOne"),
    ("vertexUvTwo", "vertexUvTwo"),
    ("vertexUvThree", "vertexUvThree"),
    ("vertexCameraOne", "vertexCameraOne"),
    ("outUV", "uv"),
    ("outUvFilterSize", "uvFilterSize"),
];

/// A default list node every shading node must be registered with, and the
/// array attribute it is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultList {
    /// Name of the list node.
    pub node: &'static str,
    /// Array attribute receiving the `message` connection.
    pub attr: &'static str,
}

/// The list of surface shaders.
pub const DEFAULT_SHADER_LIST: DefaultList = DefaultList {
    node: ":defaultShaderList1",
    attr: "s",
};
/// The list of textures.
pub const DEFAULT_TEXTURE_LIST: DefaultList = DefaultList {
    node: ":defaultTextureList1",
    attr: "tx",
};
/// The list of render utilities, such as placement nodes.
pub const DEFAULT_RENDER_UTILITY_LIST: DefaultList = DefaultList {
    node: ":defaultRenderUtilityList1",
    attr: "u",
};

/// The texture part of a shading network.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturePlan {
    /// Name of the file texture node.
    pub file_node: String,
    /// Name of the placement node.
    pub place_node: String,
    /// Path of the image, set on `fileTextureName`.
    pub path: String,
}

/// Everything needed to build the shading network of one material.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingPlan {
    /// The shader model.
    pub kind: ShaderKind,
    /// Name of the shader node.
    pub shader_node: String,
    /// Name of the shading group.
    pub group_node: String,
    /// Attribute values set on the shader.
    pub shader_attributes: Vec<(&'static str, AttrValue)>,
    /// The color texture, if the material has a color map.
    pub texture: Option<TexturePlan>,
}

/// Plans the shading network of a material.
///
/// Colors are converted to RGB. A color map replaces the diffuse color, so
/// `color` is only set on untextured shaders.
pub fn plan_material(material: &Material, kind: ShaderKind) -> ShadingPlan {
    let shader_node = material.name.clone();
    let mut shader_attributes = vec![(
        "ambientColor",
        AttrValue::Float3(to_rgb(&material.ambient).to_array()),
    )];
    if material.color_map.is_none() {
        shader_attributes.push((
            "color",
            AttrValue::Float3(to_rgb(&material.diffuse).to_array()),
        ));
    }
    if kind == ShaderKind::Blinn {
        shader_attributes.push((
            "specularColor",
            AttrValue::Float3(to_rgb(&material.specular).to_array()),
        ));
        shader_attributes.push(("specularRollOff", AttrValue::Float(material.roughness)));
    }

    let texture = material.color_map.as_ref().map(|path| TexturePlan {
        file_node: format!("{shader_node}File"),
        place_node: format!("{shader_node}Place"),
        path: path.clone(),
    });

    ShadingPlan {
        kind,
        group_node: format!("{shader_node}SG"),
        shader_node,
        shader_attributes,
        texture,
    }
}

/// Returns the constant color of a channel in RGB.
pub fn to_rgb(channel: &ColorChannel) -> Rgb {
    match channel.space {
        ColorSpace::Rgb => channel.color,
        ColorSpace::Hsv => hsv_to_rgb(channel.color),
    }
}

/// Converts an HSV triple, every component in `[0, 1]`, to RGB.
pub fn hsv_to_rgb(hsv: Rgb) -> Rgb {
    let [h, s, v] = hsv.to_array();
    if s <= 0.0 {
        return Rgb::new(v, v, v);
    }

    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}
