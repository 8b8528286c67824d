use std::path::{Path, PathBuf};

use crate::error::Error;

/// What a texture is used for when shading a mesh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureKind {
    /// Prefix of the sampler uniforms for this kind of texture. Samplers are
    /// named with this prefix followed by a number starting at 1.
    pub fn uniform_prefix(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
        }
    }
}

/// Names of the sampler uniforms for textures of the given kinds, bound to
/// texture units in order. Each kind is numbered separately.
///
/// ```
/// use meshview::{TextureKind, sampler_uniform_names};
///
/// let names = sampler_uniform_names(&[
///     TextureKind::Diffuse,
///     TextureKind::Specular,
///     TextureKind::Diffuse,
/// ]);
/// assert_eq!(names, ["texture_diffuse1", "texture_specular1", "texture_diffuse2"]);
/// ```
pub fn sampler_uniform_names(kinds: &[TextureKind]) -> Vec<String> {
    let mut counters = [0usize; 4];
    kinds
        .iter()
        .map(|kind| {
            let counter = &mut counters[*kind as usize];
            *counter += 1;
            format!("{}{}", kind.uniform_prefix(), counter)
        })
        .collect()
}

/// Layout of the pixels in a texture image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Result<Self, Error> {
        match channels {
            1 => Ok(PixelFormat::Red),
            3 => Ok(PixelFormat::Rgb),
            4 => Ok(PixelFormat::Rgba),
            other => Err(Error::UnsupportedChannelCount(other)),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Red => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Decoded texture, 8 bits per channel, rows stored top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl TextureImage {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(Error::MismatchedArrayLengths(data.len(), expected));
        }
        Ok(TextureImage {
            width,
            height,
            format,
            data,
        })
    }

    /// Single color RGBA image.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        TextureImage {
            width,
            height,
            format: PixelFormat::Rgba,
            data: color.repeat(width as usize * height as usize),
        }
    }

    fn row_len(&self) -> usize {
        self.width as usize * self.format.channels()
    }

    /// The channels of the pixel at column `x` and row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.format.channels();
        let start = y as usize * self.row_len() + x as usize * c;
        self.data.get(start..(start + c))
    }

    /// Copy of this image with the rows in reverse order. OpenGL expects the
    /// first row at the bottom of the image.
    pub fn flipped_vertically(&self) -> Self {
        let row_len = self.row_len();
        let mut data = Vec::with_capacity(self.data.len());
        if row_len > 0 {
            for row in self.data.chunks_exact(row_len).rev() {
                data.extend_from_slice(row);
            }
        }
        TextureImage {
            width: self.width,
            height: self.height,
            format: self.format,
            data,
        }
    }

    /// Pixels widened to RGBA, one array per pixel.
    pub fn to_rgba(&self) -> Vec<[u8; 4]> {
        match self.format {
            PixelFormat::Red => self.data.iter().map(|&r| [r, r, r, 255]).collect(),
            PixelFormat::Rgb => self
                .data
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            PixelFormat::Rgba => self
                .data
                .chunks_exact(4)
                .map(|p| [p[0], p[1], p[2], p[3]])
                .collect(),
        }
    }

    /// Linear blend of two images of the same size, `(1 - t) * self + t *
    /// other`, as an RGBA image.
    pub fn mix(&self, other: &TextureImage, t: f32) -> Result<TextureImage, Error> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(Error::MismatchedArrayLengths(
                self.width as usize * self.height as usize,
                other.width as usize * other.height as usize,
            ));
        }
        let t = t.clamp(0.0, 1.0);
        let data = self
            .to_rgba()
            .into_iter()
            .zip(other.to_rgba())
            .flat_map(|(a, b)| {
                std::array::from_fn::<u8, 4, _>(|i| {
                    (a[i] as f32 * (1.0 - t) + b[i] as f32 * t).round() as u8
                })
            })
            .collect();
        TextureImage::new(self.width, self.height, PixelFormat::Rgba, data)
    }
}

/// Source of texture images for the model loader.
pub trait TextureLoader {
    fn load(&mut self, path: &Path) -> Result<TextureImage, Error>;
}

/// Where the model loader looks for a texture referenced by a material:
/// the `textures` directory next to the model file.
pub fn texture_path(model_dir: &Path, file: &str) -> PathBuf {
    model_dir.join("textures").join(file)
}

/// Loads textures from disk by decoding them with the `image` crate.
#[cfg(feature = "textures")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader {
    /// Flip images so the first row is at the bottom.
    pub flip_vertically: bool,
}

#[cfg(feature = "textures")]
impl ImageLoader {
    pub fn new(flip_vertically: bool) -> Self {
        ImageLoader { flip_vertically }
    }

    /// Decode an image already in memory.
    pub fn decode(&self, bytes: &[u8], origin: &Path) -> Result<TextureImage, Error> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| Error::TextureLoadFailed(origin.to_path_buf(), e.to_string()))?;
        let texture = Self::convert(img)?;
        Ok(if self.flip_vertically {
            texture.flipped_vertically()
        } else {
            texture
        })
    }

    fn convert(img: image::DynamicImage) -> Result<TextureImage, Error> {
        let (width, height) = (img.width(), img.height());
        let (format, data) = match img.color().channel_count() {
            1 => (PixelFormat::Red, img.into_luma8().into_raw()),
            3 => (PixelFormat::Rgb, img.into_rgb8().into_raw()),
            // Luma with alpha has no matching pixel format, so it is widened.
            2 | 4 => (PixelFormat::Rgba, img.into_rgba8().into_raw()),
            other => return Err(Error::UnsupportedChannelCount(other)),
        };
        TextureImage::new(width, height, format, data)
    }
}

#[cfg(feature = "textures")]
impl TextureLoader for ImageLoader {
    fn load(&mut self, path: &Path) -> Result<TextureImage, Error> {
        log::debug!("Loading texture from {}", path.display());
        let bytes = std::fs::read(path)
            .map_err(|e| Error::TextureLoadFailed(path.to_path_buf(), e.to_string()))?;
        let texture = self.decode(&bytes, path)?;
        log::info!(
            "Loaded texture {}x{} from {}",
            texture.width,
            texture.height,
            path.display()
        );
        Ok(texture)
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{PixelFormat, TextureImage, TextureKind, sampler_uniform_names, texture_path};
    use crate::error::Error;

    #[test]
    fn t_uniform_names() {
        use TextureKind::*;
        assert_eq!(
            sampler_uniform_names(&[Diffuse, Diffuse, Specular, Normal, Height, Diffuse]),
            vec![
                "texture_diffuse1",
                "texture_diffuse2",
                "texture_specular1",
                "texture_normal1",
                "texture_height1",
                "texture_diffuse3",
            ]
        );
        assert!(sampler_uniform_names(&[]).is_empty());
    }

    #[test]
    fn t_pixel_format() {
        assert_eq!(PixelFormat::from_channels(1).unwrap(), PixelFormat::Red);
        assert_eq!(PixelFormat::from_channels(3).unwrap(), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_channels(4).unwrap(), PixelFormat::Rgba);
        assert!(matches!(
            PixelFormat::from_channels(2),
            Err(Error::UnsupportedChannelCount(2))
        ));
    }

    #[test]
    fn t_flip_vertically() {
        let img = TextureImage::new(1, 3, PixelFormat::Red, vec![1, 2, 3]).unwrap();
        let flipped = img.flipped_vertically();
        assert_eq!(flipped.data, vec![3, 2, 1]);
        assert_eq!(flipped.pixel(0, 0), Some(&[3u8][..]));
        assert_eq!(flipped.pixel(1, 0), None);
    }

    #[test]
    fn t_image_size_mismatch() {
        assert!(TextureImage::new(2, 2, PixelFormat::Rgb, vec![0; 11]).is_err());
        let solid = TextureImage::solid(2, 2, [9, 8, 7, 6]);
        assert_eq!(solid.data.len(), 16);
        assert_eq!(solid.to_rgba(), vec![[9, 8, 7, 6]; 4]);
    }

    #[test]
    fn t_mix() {
        let a = TextureImage::solid(2, 1, [200, 0, 100, 255]);
        let b = TextureImage::new(2, 1, PixelFormat::Rgb, vec![0, 100, 100, 0, 100, 100]).unwrap();
        let mixed = a.mix(&b, 0.2).unwrap();
        assert_eq!(mixed.format, PixelFormat::Rgba);
        assert_eq!(mixed.pixel(1, 0), Some(&[160u8, 20, 100, 255][..]));
        assert_eq!(a.mix(&b, 0.0).unwrap(), a);
        assert!(matches!(
            a.mix(&TextureImage::solid(1, 1, [0; 4]), 0.5),
            Err(Error::MismatchedArrayLengths(2, 1))
        ));
    }

    #[test]
    fn t_texture_path() {
        assert_eq!(
            texture_path(Path::new("assets/backpack"), "diffuse.jpg"),
            Path::new("assets/backpack/textures/diffuse.jpg")
        );
    }

    #[cfg(feature = "textures")]
    #[test]
    fn t_decode_png() {
        use super::{ImageLoader, TextureLoader};
        use std::io::Cursor;

        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 1, image::Rgb([0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("Cannot encode png");
        let plain = ImageLoader::new(false)
            .decode(&bytes, Path::new("mem.png"))
            .expect("Cannot decode png");
        assert_eq!(plain.format, PixelFormat::Rgb);
        assert_eq!(plain.pixel(0, 0), Some(&[255u8, 0, 0][..]));
        let flipped = ImageLoader::new(true)
            .decode(&bytes, Path::new("mem.png"))
            .expect("Cannot decode png");
        assert_eq!(flipped.pixel(1, 0), Some(&[0u8, 0, 255][..]));
        // Missing files are reported, not panicked on.
        assert!(matches!(
            ImageLoader::default().load(Path::new("does/not/exist.png")),
            Err(Error::TextureLoadFailed(..))
        ));
    }
}
