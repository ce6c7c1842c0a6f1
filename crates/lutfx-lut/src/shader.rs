//! GPU-side contract for the lookup cubes and indirect mask.
//!
//! Nothing here touches a graphics API. The render stage compiles
//! [`FRAGMENT_SHADER`], binds the textures described by
//! [`TextureDescriptor`] to the units listed in [`UNIFORMS`], and draws.

/// Fragment shader selecting between two lookup cubes per pixel.
///
/// Thresholds match [`PRIMARY_THRESHOLD`](crate::PRIMARY_THRESHOLD) and
/// [`SECONDARY_THRESHOLD`](crate::SECONDARY_THRESHOLD).
pub const FRAGMENT_SHADER: &str = r#"uniform sampler2D main_texture;
uniform sampler3D color_data1;
uniform sampler3D color_data2;
uniform sampler2D indirect_texture;

void
main ()
{
  vec3 tex_color = texture2D (main_texture, gl_TexCoord[0].st).rgb;
  float idx = texture2D (indirect_texture, gl_TexCoord[0].st).a;
  if (idx > 0.6)
    gl_FragColor = texture3D (color_data1, tex_color);
  else if (idx > 0.1)
    gl_FragColor = texture3D (color_data2, tex_color);
  else
    gl_FragColor.rgb = tex_color;
}
"#;

/// A sampler uniform and the texture unit it must be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformBinding {
    /// Uniform name in [`FRAGMENT_SHADER`].
    pub name: &'static str,
    /// Texture unit.
    pub unit: u32,
}

/// Original image.
pub const MAIN_TEXTURE: UniformBinding = UniformBinding { name: "main_texture", unit: 0 };
/// Primary lookup cube.
pub const COLOR_DATA1: UniformBinding = UniformBinding { name: "color_data1", unit: 1 };
/// Secondary lookup cube.
pub const COLOR_DATA2: UniformBinding = UniformBinding { name: "color_data2", unit: 2 };
/// Indirect mask.
pub const INDIRECT_TEXTURE: UniformBinding = UniformBinding { name: "indirect_texture", unit: 3 };

/// Every sampler uniform of [`FRAGMENT_SHADER`], ordered by unit.
pub const UNIFORMS: [UniformBinding; 4] =
    [MAIN_TEXTURE, COLOR_DATA1, COLOR_DATA2, INDIRECT_TEXTURE];

/// Texel layout of an uploaded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// Three unsigned 8-bit channels.
    Rgb8,
    /// One unsigned 8-bit channel, read as alpha.
    A8,
}

impl TextureFormat {
    /// Bytes per texel.
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::A8 => 1,
        }
    }
}

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Linear (trilinear for 3D textures).
    Linear,
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Coordinates outside [0, 1] read the edge texel.
    ClampToEdge,
}

/// Everything the render stage needs to upload a buffer as a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth in texels; 1 for 2D textures.
    pub depth: u32,
    /// Texel format.
    pub format: TextureFormat,
    /// Minification and magnification filter.
    pub filter: Filter,
    /// Wrap mode on every axis.
    pub wrap: WrapMode,
    /// Whether mipmaps should be generated.
    pub mipmaps: bool,
}

impl TextureDescriptor {
    /// Linear, clamp-to-edge, no mipmaps.
    pub const fn new(width: u32, height: u32, depth: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            depth,
            format,
            filter: Filter::Linear,
            wrap: WrapMode::ClampToEdge,
            mipmaps: false,
        }
    }

    /// True for 3D textures.
    pub const fn is_3d(&self) -> bool {
        self.depth > 1
    }

    /// Size of the tightly packed texel buffer.
    pub fn byte_len(&self) -> usize {
        let texels = self.width as usize * self.height as usize * self.depth as usize;
        texels * self.format.bytes_per_texel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PRIMARY_THRESHOLD, SECONDARY_THRESHOLD};

    #[test]
    fn test_shader_declares_every_uniform() {
        for binding in UNIFORMS {
            let decl = format!(" {};", binding.name);
            assert!(FRAGMENT_SHADER.contains(&decl), "missing {}", binding.name);
        }
    }

    #[test]
    fn test_shader_thresholds_match_zone_decoding() {
        assert!(FRAGMENT_SHADER.contains(&format!("idx > {:.1}", PRIMARY_THRESHOLD)));
        assert!(FRAGMENT_SHADER.contains(&format!("idx > {:.1}", SECONDARY_THRESHOLD)));
    }

    #[test]
    fn test_units_are_distinct_and_ordered() {
        for (i, binding) in UNIFORMS.iter().enumerate() {
            assert_eq!(binding.unit, i as u32);
        }
    }

    #[test]
    fn test_descriptor_byte_len() {
        let cube = TextureDescriptor::new(16, 16, 16, TextureFormat::Rgb8);
        assert!(cube.is_3d());
        assert_eq!(cube.byte_len(), 3 * 16 * 16 * 16);
        assert_eq!(cube.filter, Filter::Linear);
        assert_eq!(cube.wrap, WrapMode::ClampToEdge);
        assert!(!cube.mipmaps);

        let mask = TextureDescriptor::new(300, 370, 1, TextureFormat::A8);
        assert!(!mask.is_3d());
        assert_eq!(mask.byte_len(), 300 * 370);
    }
}
